pub mod defaults;
pub mod settings;

pub use defaults::DefaultConfig;
pub use settings::{ChecksConfig, CloneConfig, Config, EstimationConfig, IgnoreConfig, ScanConfig};
