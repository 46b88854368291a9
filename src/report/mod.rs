//! Report assembly: the ranked-cost view and the per-thread view.
//!
//! `analyze` runs the whole post-sampling pipeline over grouped snapshots
//! and returns plain data. `to_report` stamps that data with capture
//! metadata for output.

pub mod metrics;
pub mod ranked;
pub mod schema;
pub mod threads;

pub use metrics::{calculate_cost_distribution, percentage_of, CostDistribution};
pub use ranked::{dedup_contained, rank_costs};
pub use schema::{AnalysisReport, CostGroup, ThreadReport, ThreadSummary, TraceEntry};
pub use threads::{diff_trace, summarize_thread, thread_reports};

use crate::aggregator::{attribute_costs, ClampedDelta};
use crate::parser::schema::{Capture, ThreadSnapshots};
use crate::utils::config::SCHEMA_VERSION;
use log::{debug, info};

/// Knobs for report assembly
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Keep only the N most expensive cost groups (`None` keeps all)
    pub top_groups: Option<usize>,
}

/// Result of the analysis pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub hot_stacks: Vec<CostGroup>,
    pub threads: Vec<ThreadReport>,
    pub distribution: CostDistribution,
    pub clamped: Vec<ClampedDelta>,
}

/// Run the full analysis pipeline
///
/// **Public** - main entry point for analysis
///
/// # Algorithm
/// 1. Attribute tick deltas to every stack suffix (global cost table)
/// 2. Rank and deduplicate the cost table into cost groups
/// 3. Summarize each thread and build its diff trace
///
/// Deterministic: the same input always yields the same output.
pub fn analyze(threads: &ThreadSnapshots, options: &AnalysisOptions) -> Analysis {
    info!("Analyzing {} threads", threads.len());

    let attribution = attribute_costs(threads);

    let mut hot_stacks = rank_costs(&attribution.table);
    if let Some(limit) = options.top_groups {
        hot_stacks.truncate(limit);
    }

    let thread_views = thread_reports(threads);
    let distribution = calculate_cost_distribution(&thread_views, attribution.table.len());

    debug!("Distribution: {}", distribution.summary());

    Analysis {
        hot_stacks,
        threads: thread_views,
        distribution,
        clamped: attribution.clamped,
    }
}

/// Convert an analysis to the output report format
///
/// **Public** - used by commands to create final output
pub fn to_report(analysis: Analysis, capture: &Capture) -> AnalysisReport {
    use chrono::Utc;

    AnalysisReport {
        version: SCHEMA_VERSION.to_string(),
        target: capture.target.clone(),
        time_unit: capture.time_unit.clone(),
        distribution: analysis.distribution,
        hot_stacks: analysis.hot_stacks,
        threads: analysis.threads,
        clamped_deltas: analysis.clamped,
        generated_at: Utc::now().to_rfc3339(),
    }
}
