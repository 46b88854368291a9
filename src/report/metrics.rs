//! Summary statistics over the analyzed run.
//!
//! Answers "where did the process spend its CPU": how much time was
//! observed, how many threads shared it, and whether a few threads
//! dominate.

use super::schema::ThreadReport;
use serde::{Deserialize, Serialize};

/// CPU time distribution statistics
///
/// **Public** - returned from calculate_cost_distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostDistribution {
    /// CPU time across all threads (kernel + user deltas)
    pub total_cpu_time: u64,

    /// Number of sampled threads
    pub thread_count: usize,

    /// Number of snapshots across all threads
    pub snapshot_count: usize,

    /// Number of unique stack suffixes in the cost table
    pub unique_fingerprints: usize,

    /// Thread with the most CPU time
    pub busiest_thread: Option<u32>,

    /// Busiest thread's share of total CPU time
    pub busiest_thread_percentage: f64,

    /// CPU time of the top 10% of threads
    pub top_10_percent_cpu_time: u64,

    /// Percentage of total CPU time in the top 10% of threads
    pub top_10_percent_percentage: f64,
}

/// Calculate CPU time distribution statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `threads` - Thread reports, busiest first
/// * `unique_fingerprints` - Size of the cost table
pub fn calculate_cost_distribution(
    threads: &[ThreadReport],
    unique_fingerprints: usize,
) -> CostDistribution {
    if threads.is_empty() {
        return CostDistribution {
            unique_fingerprints,
            ..Default::default()
        };
    }

    let total: u64 = threads.iter().map(|t| t.summary.total_time()).sum();
    let count = threads.len();

    let busiest = &threads[0].summary;

    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_cpu_time: u64 = threads
        .iter()
        .take(top_10_percent_count)
        .map(|t| t.summary.total_time())
        .sum();

    CostDistribution {
        total_cpu_time: total,
        thread_count: count,
        snapshot_count: threads.iter().map(|t| t.sample_count).sum(),
        unique_fingerprints,
        busiest_thread: Some(busiest.thread_id),
        busiest_thread_percentage: percentage_of(busiest.total_time(), total),
        top_10_percent_cpu_time,
        top_10_percent_percentage: percentage_of(top_10_percent_cpu_time, total),
    }
}

/// Share of `total` as a percentage, 0 when total is 0
pub fn percentage_of(value: u64, total: u64) -> f64 {
    if total > 0 {
        (value as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

impl CostDistribution {
    /// Check if CPU time is highly concentrated
    ///
    /// **Public** - useful for spotting a single runaway thread
    ///
    /// Returns true if top 10% of threads consume >80% of CPU time
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Threads: {} | Snapshots: {} | Stacks: {} | Top 10%: {:.1}%",
            self.total_cpu_time,
            self.thread_count,
            self.snapshot_count,
            self.unique_fingerprints,
            self.top_10_percent_percentage
        )
    }
}
