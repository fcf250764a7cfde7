pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod scanner;
pub mod utils;

// 重新导出常用模块
pub use config::Config;
pub use error::{EstimatorError, Result};
pub use operations::{analyze, estimate, Analysis, CheckSetBuilder, Estimator};
pub use scanner::{FileWalker, LineCounter, RepositorySource};
