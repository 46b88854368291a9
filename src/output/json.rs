//! JSON output writer for reports and captures.
//!
//! Writes pretty-printed JSON, creating parent directories as needed.

use super::validate_path;
use crate::parser::schema::Capture;
use crate::report::AnalysisReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write an analysis report to a JSON file
///
/// **Public** - main entry point for report output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &AnalysisReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing report to: {}", output_path.display());
    write_json(report, output_path)
}

/// Write a capture to a JSON file
///
/// **Public** - used by the record command
pub fn write_capture(capture: &Capture, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!(
        "Writing capture ({} snapshots) to: {}",
        capture.snapshots.len(),
        output_path.display()
    );
    write_json(capture, output_path)
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<AnalysisReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: AnalysisReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} threads",
        report.version,
        report.threads.len()
    );

    Ok(report)
}

/// Serialize any value as pretty JSON to a path
///
/// **Private** - shared by report and capture writers
fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    debug!("Wrote {} bytes", calculate_file_size(output_path));

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CostDistribution, CostGroup};
    use tempfile::NamedTempFile;

    fn create_test_report() -> AnalysisReport {
        AnalysisReport {
            version: "1.0.0".to_string(),
            target: None,
            time_unit: "clock_ticks".to_string(),
            distribution: CostDistribution::default(),
            hot_stacks: vec![CostGroup {
                cost: 50,
                stacks: vec!["main\nwork".to_string()],
            }],
            threads: vec![],
            clamped_deltas: vec![],
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();
        let loaded = read_report(temp_file.path()).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.hot_stacks, report.hot_stacks);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(write_report(&create_test_report(), temp_dir.path()).is_err());
    }
}
