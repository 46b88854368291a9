//! CPU Analyzer
//!
//! Sampling CPU hotspot analysis: periodically snapshots every thread of a
//! process (kernel time, user time, kernel call stack) and attributes the
//! CPU time that elapsed between snapshots to the stacks observed.
//!
//! This crate provides the core implementation for the
//! `cpu-analyzer` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cpu-analyzer record 1234 --samples 20 --interval 500 --summary
//! cpu-analyzer analyze -i capture.json -o report.json --flamegraph cpu.svg
//! ```
//!
//! ## Library Use
//!
//! Snapshots from any source can be analyzed directly:
//!
//! ```
//! use cpu_analyzer::parser::{group_by_thread, Snapshot};
//! use cpu_analyzer::report::{analyze, AnalysisOptions};
//!
//! let stack = vec!["main".to_string(), "spin".to_string()];
//! let threads = group_by_thread(vec![
//!     Snapshot::new(1, 0, 100, stack.clone()),
//!     Snapshot::new(1, 0, 150, stack),
//! ]);
//! let analysis = analyze(&threads, &AnalysisOptions::default());
//! assert_eq!(analysis.hot_stacks[0].cost, 50);
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod report;
pub mod sampler;
pub mod utils;
