//! Plain-text console rendering of a report.
//!
//! Layout: the ranked stacks, each followed by its cost, then one block per
//! thread with its totals, common stack and diff trace.

use crate::report::{AnalysisReport, CostGroup, ThreadReport, TraceEntry};
use crate::utils::config::UNCHANGED_MARKER;
use std::fmt::Write;

const RULE: &str = "------------------------------------";

/// Render the whole report
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&render_hot_stacks(&report.hot_stacks));
    out.push_str(&render_threads(&report.threads));

    if !report.clamped_deltas.is_empty() {
        let _ = writeln!(
            out,
            "Warning: {} negative CPU time deltas were clamped to 0",
            report.clamped_deltas.len()
        );
    }

    out
}

/// Render the ranked-cost view
pub fn render_hot_stacks(groups: &[CostGroup]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Most expensive stacks");
    let _ = writeln!(out, "{}", RULE);

    for group in groups {
        for stack in &group.stacks {
            let _ = writeln!(out, "{}", stack);
            let _ = writeln!(out, "===> Cost ({})", group.cost);
            let _ = writeln!(out);
        }
    }

    out
}

/// Render the per-thread view
pub fn render_threads(threads: &[ThreadReport]) -> String {
    let mut out = String::new();

    for thread in threads {
        let summary = &thread.summary;
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}", summary.thread_id);
        let _ = writeln!(
            out,
            "Kernel: {} User: {}",
            summary.total_kernel_time, summary.total_user_time
        );
        for frame in &summary.common_stack {
            let _ = writeln!(out, "{}", frame);
        }

        let _ = writeln!(out, "Other Stacks:");
        for entry in &thread.trace {
            match entry {
                TraceEntry::Stack { frames } => {
                    let _ = writeln!(out);
                    for frame in frames {
                        let _ = writeln!(out, "{}", frame);
                    }
                }
                TraceEntry::Unchanged => {
                    let _ = writeln!(out, "{}", UNCHANGED_MARKER);
                }
            }
        }
        let _ = writeln!(out, "{}", RULE);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ThreadSummary;

    #[test]
    fn test_render_hot_stacks() {
        let text = render_hot_stacks(&[CostGroup {
            cost: 42,
            stacks: vec!["main\nspin".to_string()],
        }]);

        assert!(text.starts_with("Most expensive stacks\n"));
        assert!(text.contains("main\nspin\n===> Cost (42)\n"));
    }

    #[test]
    fn test_render_threads_marks_unchanged() {
        let text = render_threads(&[ThreadReport {
            summary: ThreadSummary {
                thread_id: 17,
                total_kernel_time: 3,
                total_user_time: 9,
                common_stack: vec!["main".to_string()],
            },
            sample_count: 2,
            trace: vec![
                TraceEntry::Stack {
                    frames: vec!["main".to_string()],
                },
                TraceEntry::Unchanged,
            ],
        }]);

        assert!(text.contains("17\nKernel: 3 User: 9\nmain\nOther Stacks:\n"));
        assert!(text.contains(UNCHANGED_MARKER));
    }
}
