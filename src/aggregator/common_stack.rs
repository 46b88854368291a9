//! Common-stack reduction for a single thread.
//!
//! The common stack is the innermost call-chain tail that every sample of
//! a thread shares frame for frame: the code path the thread stayed inside
//! for the whole observation window, whatever changed above it.

use crate::parser::schema::Snapshot;

/// Reduce a thread's stacks to the tail they all share
///
/// **Public** - main entry point for common-stack reduction
///
/// # Arguments
/// * `stacks` - Stacks in sampling order, each outermost first
///
/// # Returns
/// The shared innermost tail (possibly empty). A single stack reduces to
/// itself; no stacks at all reduce to an empty stack.
///
/// # Algorithm
/// Start with the first stack as candidate `C`. For each stack `S`:
/// 1. Drop frames from the front of `C` until it is no longer than `S`
/// 2. Line `C` up against the innermost `len(C)` frames of `S` and keep
///    only the trailing run where they agree
///
/// Once `C` is empty it stays empty. Linear in the total number of frames.
pub fn reduce_common_stack<'a, I>(stacks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut stacks = stacks.into_iter();
    let first = match stacks.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    // C is always first[start..]
    let mut start = 0;

    for stack in stacks {
        let candidate_len = first.len() - start;
        if candidate_len == 0 {
            break;
        }

        if candidate_len > stack.len() {
            start += candidate_len - stack.len();
        }

        let candidate = &first[start..];
        let aligned = &stack[stack.len() - candidate.len()..];
        let shared = shared_tail_len(candidate, aligned);
        start += candidate.len() - shared;
    }

    first[start..].to_vec()
}

/// Common stack of a snapshot sequence
///
/// **Public** - convenience wrapper over `reduce_common_stack`
pub fn common_stack_of(snapshots: &[Snapshot]) -> Vec<String> {
    reduce_common_stack(snapshots.iter().map(|s| s.stack.as_slice()))
}

/// Number of trailing frames two equal-length stacks agree on
///
/// **Private** - compares from the innermost frame outward
fn shared_tail_len(a: &[String], b: &[String]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn reduce(stacks: &[Vec<String>]) -> Vec<String> {
        reduce_common_stack(stacks.iter().map(|s| s.as_slice()))
    }

    #[test]
    fn test_shared_tail() {
        let stacks = vec![stack(&["X", "Y", "Z"]), stack(&["Y", "Z"]), stack(&["W", "Y", "Z"])];
        assert_eq!(reduce(&stacks), stack(&["Y", "Z"]));
    }

    #[test]
    fn test_no_shared_tail() {
        let stacks = vec![stack(&["A", "B"]), stack(&["C", "D"])];
        assert!(reduce(&stacks).is_empty());
    }

    #[test]
    fn test_single_sample_unchanged() {
        let stacks = vec![stack(&["main", "loop", "poll"])];
        assert_eq!(reduce(&stacks), stack(&["main", "loop", "poll"]));
    }

    #[test]
    fn test_empty_sample_empties_result() {
        let stacks = vec![stack(&["main", "poll"]), stack(&[]), stack(&["main", "poll"])];
        assert!(reduce(&stacks).is_empty());
    }

    #[test]
    fn test_no_samples() {
        assert!(reduce(&[]).is_empty());
    }

    #[test]
    fn test_interior_mismatch_trims_to_agreeing_tail() {
        let stacks = vec![stack(&["A", "B", "C"]), stack(&["A", "X", "C"])];
        assert_eq!(reduce(&stacks), stack(&["C"]));
    }

    #[test]
    fn test_outer_frames_change_inner_stay() {
        let stacks = vec![
            stack(&["main", "dispatch", "handler", "serialize"]),
            stack(&["main", "retry", "handler", "serialize"]),
            stack(&["handler", "serialize"]),
        ];
        assert_eq!(reduce(&stacks), stack(&["handler", "serialize"]));
    }
}
