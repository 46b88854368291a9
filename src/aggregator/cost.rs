//! CPU cost attribution between consecutive snapshots.
//!
//! For each pair of consecutive snapshots of one thread, the growth in
//! kernel + user time is charged to every suffix of the later snapshot's
//! stack. A short leaf-only suffix therefore collects the cost of every
//! longer stack ending in it; report assembly collapses that redundancy.

use super::fingerprint::{stack_suffixes, Fingerprint, StackSuffix};
use crate::parser::schema::{Snapshot, ThreadSnapshots};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated cost of one fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEntry {
    pub fingerprint: Fingerprint,

    /// Representative text (first one observed)
    pub text: String,

    pub cost: u64,
}

/// Fingerprint -> accumulated cost, remembering first-seen order
///
/// **Public** - built by `attribute_costs`, consumed by report assembly
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    entries: Vec<CostEntry>,
    index: HashMap<Fingerprint, usize>,
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&CostEntry> {
        self.index.get(fingerprint).map(|&i| &self.entries[i])
    }

    /// Look up cost by rendered suffix text
    pub fn cost_of(&self, text: &str) -> Option<u64> {
        self.get(&Fingerprint::of(text)).map(|e| e.cost)
    }

    /// Charge `delta` to a suffix, creating the entry if absent
    pub fn charge(&mut self, suffix: &StackSuffix, delta: u64) {
        self.charge_raw(suffix.fingerprint, &suffix.text, delta);
    }

    fn charge_raw(&mut self, fingerprint: Fingerprint, text: &str, delta: u64) {
        match self.index.get(&fingerprint) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.cost = entry.cost.saturating_add(delta);
            }
            None => {
                self.index.insert(fingerprint, self.entries.len());
                self.entries.push(CostEntry {
                    fingerprint,
                    text: text.to_string(),
                    cost: delta,
                });
            }
        }
    }

    /// Fold another table into this one
    ///
    /// Entries already present keep their position and text; new ones are
    /// appended in `other`'s first-seen order.
    pub fn merge(&mut self, other: CostTable) {
        for entry in other.entries {
            self.charge_raw(entry.fingerprint, &entry.text, entry.cost);
        }
    }
}

/// A negative tick delta that was clamped to zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedDelta {
    pub thread_id: u32,

    /// Index of the later snapshot within its thread's sequence
    pub sample_index: usize,

    pub previous_total: u64,
    pub current_total: u64,
}

/// Result of cost attribution
#[derive(Debug, Clone, Default)]
pub struct Attribution {
    pub table: CostTable,
    pub clamped: Vec<ClampedDelta>,
}

/// Attribute costs for every thread
///
/// **Public** - main entry point for cost attribution
///
/// # Arguments
/// * `threads` - Snapshot sequences keyed by thread id
///
/// # Returns
/// Global cost table plus every clamped delta
///
/// # Algorithm
/// 1. Each thread builds its own partial table
/// 2. Partials are merged in thread id order into one table
pub fn attribute_costs(threads: &ThreadSnapshots) -> Attribution {
    let mut result = Attribution::default();

    for (&thread_id, snapshots) in threads {
        let partial = attribute_thread(thread_id, snapshots);
        result.table.merge(partial.table);
        result.clamped.extend(partial.clamped);
    }

    debug!(
        "Attributed costs to {} fingerprints across {} threads",
        result.table.len(),
        threads.len()
    );

    result
}

/// Attribute costs for a single thread
///
/// **Public** - per-thread partial, independent of every other thread
pub fn attribute_thread(thread_id: u32, snapshots: &[Snapshot]) -> Attribution {
    let mut result = Attribution::default();

    for (i, pair) in snapshots.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);

        let delta = match tick_delta(prev, curr) {
            Some(delta) => delta,
            None => {
                warn!(
                    "Thread {}: CPU time went backwards at sample {} ({} -> {}), clamping to 0",
                    thread_id,
                    i + 1,
                    prev.total_time(),
                    curr.total_time()
                );
                result.clamped.push(ClampedDelta {
                    thread_id,
                    sample_index: i + 1,
                    previous_total: prev.total_time(),
                    current_total: curr.total_time(),
                });
                0
            }
        };

        for suffix in stack_suffixes(&curr.stack) {
            result.table.charge(&suffix, delta);
        }
    }

    result
}

/// Growth in kernel + user time between two snapshots, `None` if negative
pub fn tick_delta(prev: &Snapshot, curr: &Snapshot) -> Option<u64> {
    curr.total_time().checked_sub(prev.total_time())
}
