pub mod check;
pub mod estimation;
pub mod file_record;
pub mod scan_result;

pub use check::{Check, CheckDefinition, CheckSet};
pub use estimation::EstimationResult;
pub use file_record::{normalized_extension, FileRecord};
pub use scan_result::{ExtensionTally, ScanResult, ScanStats};
