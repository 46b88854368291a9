//! Ranked-cost view of the cost table.
//!
//! Every suffix of a stack carries the stack's cost, so one hot stack
//! shows up as a whole family of equal-cost entries. Grouping by cost and
//! dropping any text already contained in a longer kept text leaves one
//! representative per family: the most specific stack.

use super::schema::CostGroup;
use crate::aggregator::{CostEntry, CostTable};
use log::debug;
use std::cmp::Ordering;

/// Rank cost table entries into deduplicated cost groups
///
/// **Public** - main entry point for the ranked view
///
/// # Returns
/// Groups by descending cost. Within a group, texts are considered by
/// descending length (ties in first-seen order) and a text is kept only if
/// no already-kept text contains it.
pub fn rank_costs(table: &CostTable) -> Vec<CostGroup> {
    let mut ordered: Vec<(usize, &CostEntry)> = table.entries().iter().enumerate().collect();
    ordered.sort_by(compare_entries);

    let mut groups: Vec<CostGroup> = Vec::new();
    let mut start = 0;
    while start < ordered.len() {
        let cost = ordered[start].1.cost;
        let end = ordered[start..]
            .iter()
            .position(|(_, e)| e.cost != cost)
            .map_or(ordered.len(), |offset| start + offset);

        let texts = ordered[start..end].iter().map(|(_, e)| e.text.as_str());
        groups.push(CostGroup {
            cost,
            stacks: dedup_contained(texts),
        });
        start = end;
    }

    debug!(
        "Ranked {} fingerprints into {} cost groups",
        table.len(),
        groups.len()
    );

    groups
}

/// Keep texts not contained in an earlier kept text
///
/// **Public** - input must already be longest-first
pub fn dedup_contained<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for text in texts {
        if !kept.iter().any(|k| k.contains(text)) {
            kept.push(text.to_string());
        }
    }
    kept
}

/// Cost descending, then rendered length descending, then first-seen
///
/// **Private** - total order over table entries
fn compare_entries(a: &(usize, &CostEntry), b: &(usize, &CostEntry)) -> Ordering {
    b.1.cost
        .cmp(&a.1.cost)
        .then_with(|| text_len(&b.1.text).cmp(&text_len(&a.1.text)))
        .then_with(|| a.0.cmp(&b.0))
}

fn text_len(text: &str) -> usize {
    text.chars().count()
}
