//! Recursive alignment of a target string against the reference string.

use crate::find::{find_longest_common_substring, IndexRange};
use crate::{MorphError, Result};
use tracing::{debug, trace};

/// What to do with a target fragment that shares no character with the reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoMatchPolicy {
    /// Drop the fragment; it contributes no rows.
    #[default]
    Skip,
    /// Fail with [`MorphError::NoMatch`].
    Error,
}

/// Split `target` into pieces found in `reference`, in target order.
///
/// Each returned range indexes into `reference`. The longest common
/// substring is taken first, then the text on either side of its first
/// occurrence in `target` is aligned the same way.
pub fn decompose(reference: &[u8], target: &[u8], policy: NoMatchPolicy) -> Result<Vec<IndexRange>> {
    let mut ranges = Vec::new();
    decompose_into(reference, target, policy, &mut ranges)?;
    Ok(ranges)
}

fn decompose_into(
    reference: &[u8],
    target: &[u8],
    policy: NoMatchPolicy,
    out: &mut Vec<IndexRange>,
) -> Result<()> {
    if target.is_empty() {
        return Ok(());
    }

    let Some(range) = find_longest_common_substring(reference, target) else {
        let fragment = String::from_utf8_lossy(target).into_owned();
        return match policy {
            NoMatchPolicy::Skip => {
                debug!(fragment = %fragment, "no common substring, skipping");
                Ok(())
            }
            NoMatchPolicy::Error => Err(MorphError::NoMatch { fragment }),
        };
    };

    let needle = &reference[range.as_range()];
    let Some(at) = first_occurrence(target, needle) else {
        unreachable!("matched span {range:?} is a substring of the target");
    };
    trace!(start = range.start, end = range.end, at, "matched span");

    decompose_into(reference, &target[..at], policy, out)?;
    out.push(range);
    decompose_into(reference, &target[at + needle.len()..], policy, out)
}

fn first_occurrence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(reference: &str, target: &str) -> Vec<(usize, usize)> {
        decompose(reference.as_bytes(), target.as_bytes(), NoMatchPolicy::Skip)
            .unwrap()
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn empty_target_has_no_ranges() {
        assert!(ranges("Hello World", "").is_empty());
    }

    #[test]
    fn single_match_needs_no_recursion() {
        assert_eq!(ranges("AAABBAAA", "ABBA"), vec![(2, 6)]);
    }

    #[test]
    fn full_reference_is_one_range() {
        assert_eq!(ranges("Hello World", "Hello World"), vec![(0, 11)]);
    }

    #[test]
    fn splits_around_longest_match() {
        assert_eq!(ranges("Hello World", "Hellold"), vec![(0, 5), (9, 11)]);
    }

    #[test]
    fn keeps_target_order() {
        assert_eq!(ranges("Hello World", "World Hello"), vec![(6, 11), (5, 6), (0, 5)]);
    }

    #[test]
    fn aligned_lengths_sum_to_target_length() {
        for target in ["Hellold", "World Hello", "lol", "droW olleH", "oooo"] {
            let total: usize = ranges("Hello World", target).iter().map(|(s, e)| e - s).sum();
            assert_eq!(total, target.len(), "target {target:?}");
        }
    }

    #[test]
    fn ranges_spell_the_aligned_text() {
        let reference = "the quick brown fox";
        let target = "brown the fox";
        let spelled: String =
            ranges(reference, target).iter().map(|&(s, e)| &reference[s..e]).collect();
        assert_eq!(spelled, target);
    }

    #[test]
    fn skip_policy_drops_unmatched_fragments() {
        assert_eq!(ranges("Hello World", "Hello?"), vec![(0, 5)]);
        assert!(ranges("Hello World", "xyz").is_empty());
    }

    #[test]
    fn error_policy_reports_unmatched_fragment() {
        let err = decompose(b"Hello World", b"Hello?", NoMatchPolicy::Error).unwrap_err();
        match err {
            MorphError::NoMatch { fragment } => assert_eq!(fragment, "?"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_reference_matches_nothing() {
        assert!(ranges("", "abc").is_empty());
        assert!(decompose(b"", b"abc", NoMatchPolicy::Error).is_err());
    }
}
