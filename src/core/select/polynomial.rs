//! Telescoping-distributed parent↔(child, index) selection.
//!
//! Mirrors [`crate::core::select::exponential`] but replaces the
//! multi-exponential super-cohort split with the polynomial (triangular
//! number) split from [`crate::core::distribution::polynomial`], so the
//! super-cohort is itself subdivided into `base` slices of densely packed
//! children instead of an exponential curve.

use crate::core::cohort::{cohort_and_inner, cohort_outer};
use crate::core::distribution::polynomial::{
    multipoly_cohort_and_inner_scaled, multipoly_cohort_outer_scaled, quadsum, inv_quadsum,
};
use crate::core::select::uniform::{descend_by_child, descend_by_parent};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::{Id, NONE};

/// Shape/base parameters shared by every polynomial-selection call.
#[derive(Debug, Clone, Copy)]
pub struct PolyShape {
    pub shape: Id,
    pub base: Id,
}

/// Each super-cohort of `base` slices telescopes: slice `k` holds
/// `shape * (k+1)` parent positions instead of a flat share, so earlier
/// slices carry proportionally fewer parents (and so fewer eventual
/// children) than later ones. `parent_cohort` addresses a flat run of
/// `quadsum(base, shape)` parents per strict super-cohort by combining the
/// slice's own `quadsum` offset with the position inside it, the same way
/// [`crate::core::distribution::polynomial::multipoly_cohort_and_inner`]
/// addresses positions inside a single slice.
pub fn select_poly_parent_and_index(
    child: Id,
    avg_arity: Id,
    max_arity: Id,
    poly: PolyShape,
    seed: Id,
) -> (Id, Id) {
    if child == NONE {
        return (NONE, NONE);
    }
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");

    let upper_cohort_size = max_arity / avg_arity;
    let slices_per_super = quadsum(poly.base, poly.shape);

    let (cohort_val, within_slice) =
        multipoly_cohort_and_inner_scaled(child, poly.base, poly.shape, max_arity, seed);
    let slice = cohort_val % poly.base;
    let strict_cohort = cohort_val / poly.base;

    let (sub_cohort, remainder) = cohort_and_inner(within_slice, max_arity);
    let parent_cohort = strict_cohort * slices_per_super + quadsum(slice, poly.shape) + sub_cohort;

    let shuf = cohort_shuffle(remainder, max_arity, seed);
    let (from_upper, index) = descend_by_child(shuf, parent_cohort, seed, upper_cohort_size, max_arity);

    let unshuf = rev_cohort_shuffle(from_upper, upper_cohort_size, seed);
    let parent = cohort_outer(parent_cohort, unshuf, upper_cohort_size);
    (parent, index)
}

pub fn select_poly_nth_child(
    parent: Id,
    nth: Id,
    avg_arity: Id,
    max_arity: Id,
    poly: PolyShape,
    seed: Id,
) -> Id {
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");
    let upper_cohort_size = max_arity / avg_arity;
    let slices_per_super = quadsum(poly.base, poly.shape);

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (from_lower, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);
    if nth >= children_left {
        return NONE;
    }

    let remainder = rev_cohort_shuffle(from_lower + nth, max_arity, seed);

    let strict_cohort = parent_cohort / slices_per_super;
    let parent_addr = parent_cohort % slices_per_super;
    let slice = inv_quadsum(parent_addr, poly.shape);
    let sub_cohort = parent_addr - quadsum(slice, poly.shape);

    let within_slice = cohort_outer(sub_cohort, remainder, max_arity);
    let cohort_val = strict_cohort * poly.base + slice;

    multipoly_cohort_outer_scaled(cohort_val, within_slice, poly.base, poly.shape, max_arity, seed)
}

pub fn count_select_poly_children(parent: Id, avg_arity: Id, max_arity: Id, poly: PolyShape, seed: Id) -> Id {
    assert!(avg_arity > 0 && avg_arity <= max_arity, "avg_arity must be positive and at most max_arity");
    let upper_cohort_size = max_arity / avg_arity;

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (_, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);
    children_left
}
