pub mod analysis;
pub mod check_collector;
pub mod estimator;
pub mod report;

pub use analysis::{analyze, Analysis};
pub use check_collector::{
    accept_defaults, parse_hours, CheckPlan, CheckSetBuilder, CustomCheck, InteractiveCollector,
};
pub use estimator::{estimate, Estimator};
pub use report::{Report, ReportFormat};
