//! Flat-cohort parent↔(child, index) selection.
//!
//! Each child cohort of size `max_arity` is shared by a parent cohort of
//! size `upper_cohort_size = max_arity / avg_arity`; a recursive binary
//! split (driven by [`irrev_smooth_prng`]) apportions the children among the
//! parents so that mother-of and nth-child-of stay mutual inverses.

use crate::core::cohort::{mixed_cohort_and_inner, mixed_cohort_outer};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::core::unit::irrev_smooth_prng;
use crate::id::{Id, NONE};

/// Descends from a known child position to find its parent's shuffled inner
/// id and the child's index within that parent. `shuf` starts as the
/// child's position in `[0, max_arity)`.
pub(crate) fn descend_by_child(mut shuf: Id, cohort: Id, seed: Id, upper_cohort_size: Id, max_arity: Id) -> (Id, Id) {
    let mut from_upper = 0;
    let mut to_upper = upper_cohort_size;
    let mut parents_left = upper_cohort_size;

    let mut from_lower = 0;
    let mut to_lower = max_arity;
    let mut children_left = max_arity;

    let mut divide_at = cohort + seed;

    while parents_left > 1 {
        let half_remaining = parents_left / 2;
        divide_at = irrev_smooth_prng(divide_at, children_left, 2.min(parents_left), seed);

        if shuf >= divide_at {
            shuf -= divide_at;
            from_lower += divide_at;
            from_upper += half_remaining;
        } else {
            to_lower -= children_left - divide_at;
            to_upper -= parents_left - half_remaining;
        }
        parents_left = to_upper - from_upper;
        children_left = to_lower - from_lower;
    }

    (from_upper, shuf)
}

/// Descends from a known parent position to find the `[from_lower,
/// from_lower + children_left)` window of children belonging to it.
pub(crate) fn descend_by_parent(parent_cohort: Id, seed: Id, upper_cohort_size: Id, max_arity: Id, mut shuf: Id) -> (Id, Id) {
    let mut from_upper = 0;
    let mut to_upper = upper_cohort_size;
    let mut parents_left = upper_cohort_size;

    let mut from_lower = 0;
    let mut to_lower = max_arity;
    let mut children_left = max_arity;

    let mut divide_at = parent_cohort + seed;

    while parents_left > 1 && children_left > 0 {
        let half_remaining = parents_left / 2;
        divide_at = irrev_smooth_prng(divide_at, children_left, 2.min(parents_left), seed);

        if shuf >= half_remaining {
            shuf -= half_remaining;
            from_lower += divide_at;
            from_upper += half_remaining;
        } else {
            to_lower -= children_left - divide_at;
            to_upper -= parents_left - half_remaining;
        }
        parents_left = to_upper - from_upper;
        children_left = to_lower - from_lower;
    }

    (from_lower, children_left)
}

/// Given a child id (`>= max_arity`, per the mixed-cohort correction that
/// keeps children strictly above their parents), finds its parent and its
/// index among that parent's children.
pub fn select_parent_and_index(child: Id, avg_arity: Id, max_arity: Id, seed: Id) -> (Id, Id) {
    if child == NONE {
        return (NONE, NONE);
    }
    assert!(avg_arity < max_arity / 2, "avg_arity must stay below max_arity/2");
    if child < max_arity {
        return (NONE, NONE);
    }
    let child = child - max_arity;

    let upper_cohort_size = max_arity / avg_arity;
    let (cohort, inner) = mixed_cohort_and_inner(child, max_arity, seed);
    let shuf = cohort_shuffle(inner, max_arity, seed);

    let (from_upper, index) = descend_by_child(shuf, cohort, seed, upper_cohort_size, max_arity);

    let unshuf = rev_cohort_shuffle(from_upper, upper_cohort_size, seed);
    let parent = mixed_cohort_outer(cohort, unshuf, upper_cohort_size, seed);
    (parent, index)
}

/// Given a parent id and a child index, finds the child's id, or `NONE` if
/// the parent doesn't have that many children.
pub fn select_nth_child(parent: Id, nth: Id, avg_arity: Id, max_arity: Id, seed: Id) -> Id {
    assert!(avg_arity < max_arity / 2, "avg_arity must stay below max_arity/2");
    let upper_cohort_size = max_arity / avg_arity;

    let (cohort, inner) = mixed_cohort_and_inner(parent, upper_cohort_size, seed);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (from_lower, children_left) = descend_by_parent(cohort, seed, upper_cohort_size, max_arity, shuf);

    if nth >= children_left {
        return NONE;
    }

    let unshuf = rev_cohort_shuffle(from_lower + nth, max_arity, seed);
    let child = mixed_cohort_outer(cohort, unshuf, max_arity, seed);

    let adjusted = child.wrapping_add(max_arity);
    if adjusted < child { NONE } else { adjusted }
}

/// The number of children assigned to `parent`, without materializing any
/// of them.
pub fn count_select_children(parent: Id, avg_arity: Id, max_arity: Id, seed: Id) -> Id {
    assert!(avg_arity < max_arity / 2, "avg_arity must stay below max_arity/2");
    let upper_cohort_size = max_arity / avg_arity;

    let (cohort, inner) = mixed_cohort_and_inner(parent, upper_cohort_size, seed);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (_, children_left) = descend_by_parent(cohort, seed, upper_cohort_size, max_arity, shuf);
    children_left
}
