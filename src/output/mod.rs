//! Output writers for reports, captures and flamegraphs.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports and captures
//! - SVG flamegraphs
//! - Plain-text console rendering

pub mod json;
pub mod svg;
pub mod text;

// Re-export main functions
pub use json::{read_report, write_capture, write_report};
pub use svg::write_svg;
pub use text::render_report;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
