use crate::output::read_report;
use crate::parser::{parse_capture, validate_capture_format};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Validate a report or capture JSON file
///
/// Reports are recognized by their `hot_stacks` field; anything else must
/// look like a capture.
pub fn validate_file(file_path: impl AsRef<Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open {}", file_path.display()))?;
    let raw: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not valid JSON", file_path.display()))?;

    if raw.get("hot_stacks").is_some() {
        return validate_report_file(file_path);
    }

    if !validate_capture_format(&raw) {
        anyhow::bail!("{} is neither a report nor a capture", file_path.display());
    }

    println!("Validating capture: {}", file_path.display());
    let capture = parse_capture(&raw)?;

    println!("✓ Valid capture JSON");
    println!("  Version: {}", capture.version);
    if let Some(target) = &capture.target {
        println!("  Target PID: {}", target.pid);
    }
    println!("  Time Unit: {}", capture.time_unit);
    println!("  Snapshots: {}", capture.snapshots.len());

    Ok(())
}

/// Validate a report JSON file
pub fn validate_report_file(file_path: impl AsRef<Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    if let Some(target) = &report.target {
        println!("  Target PID: {}", target.pid);
    }
    println!("  Time Unit: {}", report.time_unit);
    println!("  Total CPU Time: {}", report.distribution.total_cpu_time);
    println!("  Threads: {}", report.threads.len());
    println!("  Cost Groups: {}", report.hot_stacks.len());
    if !report.clamped_deltas.is_empty() {
        println!("  Clamped Deltas: {}", report.clamped_deltas.len());
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("CPU Analyzer Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  target: object?            - Sampled process (pid, name)");
        println!("  time_unit: string          - Unit of all cost values");
        println!("  distribution: object       - CPU time concentration statistics");
        println!("  hot_stacks: array          - Cost groups, most expensive first");
        println!("    cost: number             - Accumulated CPU time of the group");
        println!("    stacks: array            - Deduplicated stack suffixes (newline separated)");
        println!("  threads: array             - Per-thread view, busiest first");
        println!("    summary: object          - Thread id, kernel/user totals, common stack");
        println!("    sample_count: number     - Snapshots seen for the thread");
        println!("    trace: array             - 'stack' entries or 'unchanged' markers");
        println!("  clamped_deltas: array      - Counter decreases clamped to zero");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("CPU Analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A sampling CPU profiler that attributes thread CPU time to kernel stacks.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_accepts_capture() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("capture.json");
        std::fs::write(
            &path,
            r#"{"snapshots": [{"thread_id": 1, "kernel_time": 0, "user_time": 3}]}"#,
        )
        .unwrap();

        assert!(validate_file(&path).is_ok());
    }

    #[test]
    fn test_validate_file_rejects_unknown_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("other.json");
        std::fs::write(&path, r#"{"rows": []}"#).unwrap();

        assert!(validate_file(&path).is_err());
    }
}
