//! Record command implementation.
//!
//! The record command:
//! 1. Resolves the target process
//! 2. Samples every thread for the requested number of ticks
//! 3. Writes the capture file
//! 4. Analyzes the capture (if any report output was requested)

use super::analyze::{report_capture, validate_output_args};
use super::models::RecordArgs;
use crate::output::write_capture;
use crate::parser::{Capture, Snapshot, TargetInfo};
use crate::sampler::{collect_snapshots, resolve_target, ProcfsSampler, SamplingConfig};
use crate::utils::config::{MAX_INTERVAL_MS, MAX_SAMPLES, PROCFS_TIME_UNIT, SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::time::{Duration, Instant};

/// Execute the record command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Target process not found
/// * First sampling tick fails (permissions, process gone)
/// * File write errors
pub fn execute_record(args: RecordArgs) -> Result<Capture> {
    let start_time = Instant::now();

    info!("Resolving target: {}", args.target);
    let target = resolve_target(&args.target)
        .with_context(|| format!("Failed to resolve target '{}'", args.target))?;
    info!(
        "✓ Target pid {}{}",
        target.pid,
        target.name.as_deref().map(|n| format!(" ({})", n)).unwrap_or_default()
    );

    let config = SamplingConfig {
        samples: args.samples,
        interval: Duration::from_millis(args.interval_ms),
    };

    let mut sampler = ProcfsSampler::new(target.pid).with_freeze(args.freeze);
    let snapshots = collect_snapshots(&mut sampler, &config).context("Failed to sample target")?;
    info!("✓ Collected {} snapshots", snapshots.len());

    let capture = build_capture(target, &config, snapshots);

    write_capture(&capture, &args.output_capture).context("Failed to write capture")?;
    info!("✓ Capture written to: {}", args.output_capture.display());

    if args.outputs.wants_analysis() {
        report_capture(&capture, &args.outputs)?;
    }

    info!("Record completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(capture)
}

/// Assemble the capture document for a finished sampling run
pub fn build_capture(target: TargetInfo, config: &SamplingConfig, snapshots: Vec<Snapshot>) -> Capture {
    Capture {
        version: SCHEMA_VERSION.to_string(),
        target: Some(target),
        samples: config.samples,
        interval_ms: config.interval.as_millis() as u64,
        time_unit: PROCFS_TIME_UNIT.to_string(),
        captured_at: Utc::now().to_rfc3339(),
        snapshots,
    }
}

/// Validate record arguments
///
/// **Public** - can be called before execute_record for early validation
pub fn validate_record_args(args: &RecordArgs) -> Result<()> {
    if args.target.trim().is_empty() {
        anyhow::bail!("Target cannot be empty");
    }

    if args.samples == 0 {
        anyhow::bail!("samples must be greater than 0");
    }

    if args.samples > MAX_SAMPLES {
        anyhow::bail!("samples is too large (max {})", MAX_SAMPLES);
    }

    if args.interval_ms == 0 || args.interval_ms > MAX_INTERVAL_MS {
        anyhow::bail!("interval must be between 1 and {} ms", MAX_INTERVAL_MS);
    }

    if args.output_capture.as_os_str().is_empty() {
        anyhow::bail!("Capture output path cannot be empty");
    }

    validate_output_args(&args.outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(target: &str) -> RecordArgs {
        RecordArgs {
            target: target.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_record_args_valid() {
        assert!(validate_record_args(&args_for("1234")).is_ok());
        assert!(validate_record_args(&args_for("nginx")).is_ok());
    }

    #[test]
    fn test_validate_record_args_empty_target() {
        assert!(validate_record_args(&args_for("  ")).is_err());
    }

    #[test]
    fn test_validate_record_args_sample_bounds() {
        let mut args = args_for("1234");
        args.samples = 0;
        assert!(validate_record_args(&args).is_err());

        args.samples = MAX_SAMPLES + 1;
        assert!(validate_record_args(&args).is_err());
    }

    #[test]
    fn test_validate_record_args_interval_bounds() {
        let mut args = args_for("1234");
        args.interval_ms = 0;
        assert!(validate_record_args(&args).is_err());

        args.interval_ms = MAX_INTERVAL_MS + 1;
        assert!(validate_record_args(&args).is_err());
    }

    #[test]
    fn test_build_capture_records_run_parameters() {
        let config = SamplingConfig {
            samples: 3,
            interval: Duration::from_millis(250),
        };
        let target = TargetInfo {
            pid: 42,
            name: Some("worker".to_string()),
        };
        let capture = build_capture(target.clone(), &config, vec![Snapshot::new(42, 1, 2, vec![])]);

        assert_eq!(capture.version, SCHEMA_VERSION);
        assert_eq!(capture.target, Some(target));
        assert_eq!(capture.samples, 3);
        assert_eq!(capture.interval_ms, 250);
        assert_eq!(capture.time_unit, PROCFS_TIME_UNIT);
        assert_eq!(capture.snapshots.len(), 1);
    }
}
