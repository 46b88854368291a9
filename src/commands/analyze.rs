//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads a capture file
//! 2. Groups snapshots per thread
//! 3. Attributes costs and assembles the report
//! 4. Writes the report and summary
//! 5. Generates flamegraph (if requested and any CPU time was observed)

use super::models::{AnalyzeArgs, OutputArgs};
use crate::aggregator::build_collapsed_stacks;
use crate::flamegraph::{generate_flamegraph, FlamegraphConfig};
use crate::output::{render_report, write_report, write_svg};
use crate::parser::{group_by_thread, read_capture, Capture};
use crate::report::{analyze, to_report, AnalysisOptions, AnalysisReport};
use crate::utils::config::MAX_TOP_GROUPS;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Capture read/parse failures
/// * Flamegraph generation errors
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Reading capture: {}", args.input.display());
    let capture = read_capture(&args.input)
        .with_context(|| format!("Failed to read capture {}", args.input.display()))?;

    let report = report_capture(&capture, &args.outputs)?;

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(report)
}

/// Analyze a capture and emit every requested output
///
/// **Public** - shared with the record command
pub fn report_capture(capture: &Capture, outputs: &OutputArgs) -> Result<AnalysisReport> {
    info!("Step 1/4: Grouping {} snapshots by thread...", capture.snapshots.len());
    let threads = group_by_thread(capture.snapshots.iter().cloned());

    info!("Step 2/4: Attributing costs and assembling report...");
    let options = AnalysisOptions {
        top_groups: Some(outputs.top_groups),
    };
    let analysis = analyze(&threads, &options);

    debug!("Top 3 cost groups:");
    for (i, group) in analysis.hot_stacks.iter().take(3).enumerate() {
        debug!("  {}. cost {} ({} stacks)", i + 1, group.cost, group.stacks.len());
    }

    info!("Step 3/4: Writing report...");
    let report = to_report(analysis, capture);

    if let Some(json_path) = &outputs.output_json {
        write_report(&report, json_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    if outputs.print_summary {
        println!("{}", render_report(&report));
    }

    // Step 4: Flamegraph
    if let Some(svg_path) = &outputs.output_svg {
        info!("Step 4/4: Generating flamegraph...");
        let stacks = build_collapsed_stacks(&threads);

        if stacks.is_empty() {
            warn!("No CPU time was observed, skipping flamegraph {}", svg_path.display());
        } else {
            let config = outputs
                .flamegraph_config
                .clone()
                .unwrap_or_else(FlamegraphConfig::new)
                .with_count_name(capture.time_unit.clone());

            let svg = generate_flamegraph(&stacks, Some(&config)).context("Failed to generate flamegraph")?;
            write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
            info!("✓ Flamegraph written to: {}", svg_path.display());
        }
    } else {
        info!("Step 4/4: Skipping flamegraph generation (not requested)");
    }

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_analyze_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input capture path cannot be empty");
    }

    validate_output_args(&args.outputs)
}

/// Validate output arguments
///
/// **Public** - shared by record and analyze validation
pub fn validate_output_args(outputs: &OutputArgs) -> Result<()> {
    if outputs.top_groups == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if outputs.top_groups > MAX_TOP_GROUPS {
        anyhow::bail!("top is too large (max {})", MAX_TOP_GROUPS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_analyze_args_valid() {
        assert!(validate_analyze_args(&AnalyzeArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_analyze_args_empty_input() {
        let args = AnalyzeArgs {
            input: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_analyze_args(&args).is_err());
    }

    #[test]
    fn test_validate_output_args_top_bounds() {
        let zero = OutputArgs {
            top_groups: 0,
            ..Default::default()
        };
        let huge = OutputArgs {
            top_groups: MAX_TOP_GROUPS + 1,
            ..Default::default()
        };

        assert!(validate_output_args(&zero).is_err());
        assert!(validate_output_args(&huge).is_err());
    }
}
