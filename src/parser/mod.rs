//! Capture parsing and snapshot definitions.
//!
//! This module handles:
//! - The `Snapshot` record produced by the sampler
//! - Parsing capture JSON (object or bare array)
//! - Grouping snapshots per thread for analysis

pub mod capture;
pub mod schema;

// Re-export main types
pub use capture::{group_by_thread, parse_capture, read_capture, validate_capture_format};
pub use schema::{Capture, Snapshot, TargetInfo, ThreadSnapshots};
