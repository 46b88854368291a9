//! Per-thread view: totals, common stack and diff trace.

use super::schema::{ThreadReport, ThreadSummary, TraceEntry};
use crate::aggregator::common_stack_of;
use crate::parser::schema::{Snapshot, ThreadSnapshots};
use log::warn;

/// Summarize one thread's snapshot sequence
///
/// **Public** - deltas are last minus first, saturating at zero
pub fn summarize_thread(thread_id: u32, snapshots: &[Snapshot]) -> ThreadSummary {
    let (first, last) = match (snapshots.first(), snapshots.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return ThreadSummary {
                thread_id,
                total_kernel_time: 0,
                total_user_time: 0,
                common_stack: Vec::new(),
            }
        }
    };

    ThreadSummary {
        thread_id,
        total_kernel_time: counter_delta(thread_id, "kernel", first.kernel_time, last.kernel_time),
        total_user_time: counter_delta(thread_id, "user", first.user_time, last.user_time),
        common_stack: common_stack_of(snapshots),
    }
}

/// Collapse repeated stacks into `Unchanged` markers
///
/// **Public** - the first sample is always emitted in full
pub fn diff_trace(snapshots: &[Snapshot]) -> Vec<TraceEntry> {
    let mut trace = Vec::with_capacity(snapshots.len());
    let mut prev: Option<&[String]> = None;

    for snapshot in snapshots {
        let stack = snapshot.stack.as_slice();
        if prev == Some(stack) {
            trace.push(TraceEntry::Unchanged);
        } else {
            trace.push(TraceEntry::Stack {
                frames: stack.to_vec(),
            });
        }
        prev = Some(stack);
    }

    trace
}

/// Build every thread's report, busiest first
///
/// **Public** - ties on total time are ordered by ascending thread id
pub fn thread_reports(threads: &ThreadSnapshots) -> Vec<ThreadReport> {
    let mut reports: Vec<ThreadReport> = threads
        .iter()
        .map(|(&thread_id, snapshots)| ThreadReport {
            summary: summarize_thread(thread_id, snapshots),
            sample_count: snapshots.len(),
            trace: diff_trace(snapshots),
        })
        .collect();

    reports.sort_by(|a, b| {
        b.summary
            .total_time()
            .cmp(&a.summary.total_time())
            .then_with(|| a.summary.thread_id.cmp(&b.summary.thread_id))
    });

    reports
}

/// Delta of a single counter between first and last snapshot
///
/// **Private** - a counter going backwards is reported and treated as zero
fn counter_delta(thread_id: u32, name: &str, first: u64, last: u64) -> u64 {
    last.checked_sub(first).unwrap_or_else(|| {
        warn!(
            "Thread {}: {} time decreased over the run ({} -> {}), reporting 0",
            thread_id, name, first, last
        );
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tid: u32, kernel: u64, user: u64, stack: &[&str]) -> Snapshot {
        Snapshot::new(tid, kernel, user, stack.iter().map(|s| s.to_string()).collect())
    }

    fn frames(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summarize_single_snapshot() {
        let summary = summarize_thread(3, &[snap(3, 10, 20, &["main", "wait"])]);

        assert_eq!(summary.total_kernel_time, 0);
        assert_eq!(summary.total_user_time, 0);
        assert_eq!(summary.common_stack, frames(&["main", "wait"]));
    }

    #[test]
    fn test_summarize_deltas() {
        let summary = summarize_thread(
            1,
            &[snap(1, 10, 100, &["main", "a"]), snap(1, 15, 180, &["main", "a"])],
        );

        assert_eq!(summary.total_kernel_time, 5);
        assert_eq!(summary.total_user_time, 80);
        assert_eq!(summary.total_time(), 85);
    }

    #[test]
    fn test_summarize_backwards_counter_saturates() {
        let summary = summarize_thread(1, &[snap(1, 50, 0, &[]), snap(1, 10, 5, &[])]);
        assert_eq!(summary.total_kernel_time, 0);
        assert_eq!(summary.total_user_time, 5);
    }

    #[test]
    fn test_summarize_empty_sequence() {
        let summary = summarize_thread(9, &[]);
        assert_eq!(summary.total_time(), 0);
        assert!(summary.common_stack.is_empty());
    }

    #[test]
    fn test_diff_trace() {
        let trace = diff_trace(&[
            snap(1, 0, 0, &["a", "b"]),
            snap(1, 0, 0, &["a", "b"]),
            snap(1, 0, 0, &["a", "c"]),
            snap(1, 0, 0, &["a", "b"]),
        ]);

        assert_eq!(
            trace,
            vec![
                TraceEntry::Stack { frames: frames(&["a", "b"]) },
                TraceEntry::Unchanged,
                TraceEntry::Stack { frames: frames(&["a", "c"]) },
                TraceEntry::Stack { frames: frames(&["a", "b"]) },
            ]
        );
    }

    #[test]
    fn test_diff_trace_first_empty_stack_emitted() {
        let trace = diff_trace(&[snap(1, 0, 0, &[]), snap(1, 0, 0, &[])]);
        assert_eq!(
            trace,
            vec![TraceEntry::Stack { frames: vec![] }, TraceEntry::Unchanged]
        );
    }

    #[test]
    fn test_thread_reports_sorted() {
        let mut threads = ThreadSnapshots::new();
        threads.insert(1, vec![snap(1, 0, 0, &["x"]), snap(1, 0, 10, &["x"])]);
        threads.insert(2, vec![snap(2, 0, 0, &["y"]), snap(2, 0, 30, &["y"])]);
        threads.insert(3, vec![snap(3, 0, 0, &["z"]), snap(3, 10, 0, &["z"])]);

        let order: Vec<u32> = thread_reports(&threads)
            .iter()
            .map(|r| r.summary.thread_id)
            .collect();
        assert_eq!(order, vec![2, 1, 3]);
    }
}
