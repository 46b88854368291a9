//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod record;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, report_capture, validate_analyze_args};
pub use models::{AnalyzeArgs, OutputArgs, RecordArgs};
pub use record::{build_capture, execute_record, validate_record_args};
pub use utils::{display_schema, display_version, validate_file, validate_report_file};
