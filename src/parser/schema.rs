//! Snapshot and capture file definitions.
//!
//! A `Snapshot` is one sampled instant of one thread. A `Capture` is the
//! file the `record` command writes and the `analyze` command reads.
//! Schema is versioned to allow future evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sampled instant of a thread's CPU counters and call stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Thread identifier, stable for the sampling run
    #[serde(alias = "id", alias = "tid")]
    pub thread_id: u32,

    /// Wall-clock capture time (informational only)
    #[serde(default, alias = "time")]
    pub timestamp: DateTime<Utc>,

    /// Kernel-mode CPU time counter
    #[serde(alias = "kernel", alias = "kernelTime")]
    pub kernel_time: u64,

    /// User-mode CPU time counter
    #[serde(alias = "user", alias = "userTime")]
    pub user_time: u64,

    /// Frame labels, outermost first, innermost (executing) last
    #[serde(default, alias = "stackTrace", alias = "frames")]
    pub stack: Vec<String>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(thread_id: u32, kernel_time: u64, user_time: u64, stack: Vec<String>) -> Self {
        Self {
            thread_id,
            timestamp: Utc::now(),
            kernel_time,
            user_time,
            stack,
        }
    }

    /// Combined kernel + user counter
    pub fn total_time(&self) -> u64 {
        self.kernel_time.saturating_add(self.user_time)
    }
}

/// Snapshots grouped per thread, each sequence in sampling order.
///
/// Keyed by a `BTreeMap` so every pass over the threads visits them in
/// ascending thread id order.
pub type ThreadSnapshots = BTreeMap<u32, Vec<Snapshot>>;

/// Identity of the sampled process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub pid: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Top-level capture structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capture {
    /// Schema version for compatibility checking
    pub version: String,

    /// Sampled process (absent for synthetic captures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetInfo>,

    /// Number of sampling ticks requested
    pub samples: usize,

    /// Requested interval between ticks
    pub interval_ms: u64,

    /// Unit of `kernel_time` / `user_time`
    pub time_unit: String,

    /// Timestamp when sampling finished
    pub captured_at: String,

    /// Flat stream of snapshots in arrival order
    pub snapshots: Vec<Snapshot>,
}
