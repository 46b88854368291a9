//! Aggregation of snapshots into fingerprints, costs and common stacks.
//!
//! This module transforms per-thread snapshot sequences into:
//! - Suffix fingerprints (one per stack suffix)
//! - A global cost table (CPU time per fingerprint)
//! - Per-thread common stacks
//! - Collapsed stacks (for flamegraph generation)

pub mod common_stack;
pub mod cost;
pub mod fingerprint;
pub mod stack_builder;

// Re-export main types and functions
pub use common_stack::{common_stack_of, reduce_common_stack};
pub use cost::{attribute_costs, attribute_thread, Attribution, ClampedDelta, CostEntry, CostTable};
pub use fingerprint::{render_frames, stack_suffixes, Fingerprint, StackSuffix};
pub use stack_builder::{build_collapsed_stacks, CollapsedStack};
