//! Build collapsed stack format from per-thread snapshots.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "outer;middle;inner weight"
//!
//! Unlike the cost table, each tick is charged once, to its full stack,
//! so the widths in a flamegraph add up to the CPU time actually observed.

use super::cost::tick_delta;
use crate::parser::schema::ThreadSnapshots;
use crate::utils::config::COLLAPSED_SEPARATOR;
use log::debug;
use std::collections::HashMap;

/// Label used for ticks whose stack could not be resolved
pub const UNRESOLVED_FRAME: &str = "[unresolved]";

/// A single collapsed stack entry
///
/// **Public** - used by flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Weight (CPU time attributed to this stack)
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Format: "stack weight"
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Build collapsed stacks from per-thread snapshots
///
/// **Public** - main entry point for stack building
///
/// # Returns
/// One entry per unique full stack with non-zero weight, heaviest first,
/// ties broken by stack text
pub fn build_collapsed_stacks(threads: &ThreadSnapshots) -> Vec<CollapsedStack> {
    let mut stack_map: HashMap<String, u64> = HashMap::new();

    for snapshots in threads.values() {
        for pair in snapshots.windows(2) {
            let delta = tick_delta(&pair[0], &pair[1]).unwrap_or(0);
            if delta == 0 {
                continue;
            }

            let stack_str = collapse_frames(&pair[1].stack);
            *stack_map.entry(stack_str).or_insert(0) += delta;
        }
    }

    let mut stacks: Vec<CollapsedStack> = stack_map
        .into_iter()
        .map(|(stack, weight)| CollapsedStack::new(stack, weight))
        .collect();

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));

    debug!("Built {} unique collapsed stacks", stacks.len());

    stacks
}

/// Join frames with the collapsed separator
///
/// **Private** - separators inside frame names would split the frame
fn collapse_frames(frames: &[String]) -> String {
    if frames.is_empty() {
        return UNRESOLVED_FRAME.to_string();
    }

    frames
        .iter()
        .map(|f| f.replace(COLLAPSED_SEPARATOR, ","))
        .collect::<Vec<_>>()
        .join(&COLLAPSED_SEPARATOR.to_string())
}
