//! Exponentially distributed parent↔(child, index) selection.
//!
//! Instead of a flat child cohort, children are drawn from an entire
//! super-cohort (`max_arity * exp_cohort_size` wide) that is itself
//! distributed across `exp_cohort_layers` neighboring parent cohorts via
//! [`crate::core::distribution::multiexp`]; a sub-cohort of size `max_arity`
//! is then re-shuffled to yield the final per-parent children, using the
//! same binary-descent apportionment as the uniform variant.

use crate::core::cohort::cohort_and_inner;
use crate::core::distribution::multiexp::{multiexp_cohort_and_inner, multiexp_cohort_outer};
use crate::core::select::uniform::{descend_by_child, descend_by_parent};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::{Id, NONE};

/// Shape/size/layer parameters shared by every exponential-selection call.
#[derive(Debug, Clone, Copy)]
pub struct ExpShape {
    pub shape: f64,
    pub cohort_size: Id,
    pub layers: Id,
}

pub fn select_exp_parent_and_index(
    child: Id,
    avg_arity: Id,
    max_arity: Id,
    exp: ExpShape,
    seed: Id,
) -> (Id, Id) {
    if child == NONE {
        return (NONE, NONE);
    }
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");

    let upper_cohort_size = max_arity / avg_arity;
    let lower_cohort_size = max_arity * exp.cohort_size;

    let (super_cohort, inner) = multiexp_cohort_and_inner(child, exp.shape, lower_cohort_size, exp.layers, seed);
    if super_cohort == NONE && inner == NONE {
        return (NONE, NONE);
    }

    let inner = cohort_shuffle(inner, lower_cohort_size, seed);
    let (sub_cohort, inner) = cohort_and_inner(inner, max_arity);

    let parent_cohort = super_cohort * exp.cohort_size + sub_cohort;
    let shuf = cohort_shuffle(inner, max_arity, seed);

    let (from_upper, index) = descend_by_child(shuf, parent_cohort, seed, upper_cohort_size, max_arity);

    let unshuf = rev_cohort_shuffle(from_upper, upper_cohort_size, seed);
    let parent = crate::core::cohort::cohort_outer(parent_cohort, unshuf, upper_cohort_size);
    (parent, index)
}

pub fn select_exp_nth_child(
    parent: Id,
    nth: Id,
    avg_arity: Id,
    max_arity: Id,
    exp: ExpShape,
    seed: Id,
) -> Id {
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");

    let upper_cohort_size = max_arity / avg_arity;
    let lower_cohort_size = max_arity * exp.cohort_size;

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (from_lower, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);

    if nth >= children_left {
        return NONE;
    }

    let unshuf = rev_cohort_shuffle(from_lower + nth, max_arity, seed);
    let outer = crate::core::cohort::cohort_outer(parent_cohort % exp.cohort_size, unshuf, max_arity);

    let unshuf_super = rev_cohort_shuffle(outer, lower_cohort_size, seed);

    multiexp_cohort_outer(
        parent_cohort / exp.cohort_size,
        unshuf_super,
        exp.shape,
        lower_cohort_size,
        exp.layers,
        seed,
    )
}

pub fn count_select_exp_children(parent: Id, avg_arity: Id, max_arity: Id, exp: ExpShape, seed: Id) -> Id {
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");
    let upper_cohort_size = max_arity / avg_arity;

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (_, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);
    children_left
}
