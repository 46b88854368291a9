//! Output JSON schema definitions for analysis reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use super::metrics::CostDistribution;
use crate::aggregator::ClampedDelta;
use crate::parser::schema::TargetInfo;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Sampled process, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetInfo>,

    /// Unit of every cost and time value in the report
    pub time_unit: String,

    /// Summary statistics
    pub distribution: CostDistribution,

    /// Cost groups, most expensive first
    pub hot_stacks: Vec<CostGroup>,

    /// Per-thread views, busiest thread first
    pub threads: Vec<ThreadReport>,

    /// Negative deltas that were clamped to zero
    #[serde(default)]
    pub clamped_deltas: Vec<ClampedDelta>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Stacks that were attributed exactly the same cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostGroup {
    pub cost: u64,

    /// Representative stack texts, longest first, none contained in another
    pub stacks: Vec<String>,
}

/// Derived per-thread totals and steady-state stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: u32,

    /// Kernel time delta, last snapshot minus first
    pub total_kernel_time: u64,

    /// User time delta, last snapshot minus first
    pub total_user_time: u64,

    /// Frames shared by every sample of the thread, outermost first
    pub common_stack: Vec<String>,
}

impl ThreadSummary {
    pub fn total_time(&self) -> u64 {
        self.total_kernel_time.saturating_add(self.total_user_time)
    }
}

/// One step of a thread's diff trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEntry {
    /// Stack differs from the previous sample
    Stack { frames: Vec<String> },

    /// Same stack as the previous sample
    Unchanged,
}

/// Thread summary paired with its diff trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReport {
    pub summary: ThreadSummary,
    pub sample_count: usize,
    pub trace: Vec<TraceEntry>,
}
