pub mod file_walker;
pub mod ignore_rules;
pub mod line_counter;
pub mod repository;

pub use file_walker::{CandidateFiles, FileWalker, WalkStats};
pub use ignore_rules::IgnoreRules;
pub use line_counter::{count_lines, is_binary, LineCounter};
pub use repository::{clone_repository, Checkout, RepositorySource};
