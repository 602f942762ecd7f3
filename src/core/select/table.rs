//! Table-weighted parent↔(child, index) selection.
//!
//! Mirrors [`crate::core::select::polynomial`] but replaces the triangular
//! slice split with an arbitrary empirical [`SumTable`], so the relative
//! share of parents claimed by each bucket comes from measured data (an
//! age-of-mother histogram, say) instead of a closed-form curve.
//!
//! Two things set this variant apart from its siblings, both matching
//! `original_source`'s `acy_select_table_parent_and_index` /
//! `acy_select_table_nth_child` (`c/src/core/select.h:148-185`):
//!
//! - `parent_cohort_size` is used directly as `upper_cohort_size` — it names
//!   a parent cohort's own width, not an average arity to divide `max_arity`
//!   by. A `parent_cohort_size` of `32` against a `max_arity` of `32` means
//!   32 parents sharing a 32-child cohort, i.e. roughly one child each — not
//!   one parent owning all 32.
//! - `multiplier` (the table's real-id bucket-width scale, e.g.
//!   [`crate::family::birth::birth_age_table_multiplier`]) is a separate
//!   parameter from `max_arity` (the flat child-cohort width the descent
//!   layer splits parents over). The two happen to coincide in
//!   [`crate::core::select::polynomial`] and
//!   [`crate::core::select::exponential`], but the age-of-mother table needs
//!   them decoupled: its multiplier is a real-year-scaled constant derived
//!   from the birth rate, nothing to do with how many children a cohort of
//!   parents shares.

use crate::core::cohort::{cohort_and_inner, cohort_outer};
use crate::core::distribution::table::{
    table_bucket_for_scaled, tabulated_cohort_and_inner_scaled, tabulated_cohort_outer_scaled, SumTable,
};
use crate::core::select::uniform::{descend_by_child, descend_by_parent};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::{Id, NONE};

/// Flat slots of width `max_arity` spanning one scaled super-cohort
/// (`table.total() * multiplier` raw ids), rounded up so every slot —
/// including a final partial one where the scaled total isn't an exact
/// multiple of `max_arity` — gets a unique address.
fn slots_per_super(table: &SumTable, max_arity: Id, multiplier: Id) -> Id {
    let total_size = table.total() * multiplier;
    total_size.div_ceil(max_arity)
}

pub fn select_table_parent_and_index(
    child: Id,
    parent_cohort_size: Id,
    max_arity: Id,
    table: &SumTable,
    multiplier: Id,
    seed: Id,
) -> (Id, Id) {
    if child == NONE {
        return (NONE, NONE);
    }
    assert!(
        parent_cohort_size > 0 && parent_cohort_size <= max_arity,
        "parent_cohort_size must be positive and at most max_arity"
    );

    let upper_cohort_size = parent_cohort_size;
    let n = table.len() as Id;
    let slots = slots_per_super(table, max_arity, multiplier);

    let (cohort_val, within_bucket) = tabulated_cohort_and_inner_scaled(child, table, multiplier, seed);
    let bucket = (cohort_val % n) as usize;
    let strict_cohort = cohort_val / n;

    // Reconstructs the flat (bucket-spanning) position the table layer
    // shuffled internally, so the `max_arity`-wide split below doesn't have
    // to respect bucket boundaries — see `slots_per_super`.
    let flat = table.prefix_before(bucket) * multiplier + within_bucket;
    let (sub_cohort, remainder) = cohort_and_inner(flat, max_arity);
    let parent_cohort = strict_cohort * slots + sub_cohort;

    let shuf = cohort_shuffle(remainder, max_arity, seed);
    let (from_upper, index) = descend_by_child(shuf, parent_cohort, seed, upper_cohort_size, max_arity);

    let unshuf = rev_cohort_shuffle(from_upper, upper_cohort_size, seed);
    let parent = cohort_outer(parent_cohort, unshuf, upper_cohort_size);
    (parent, index)
}

pub fn select_table_nth_child(
    parent: Id,
    nth: Id,
    parent_cohort_size: Id,
    max_arity: Id,
    table: &SumTable,
    multiplier: Id,
    seed: Id,
) -> Id {
    assert!(
        parent_cohort_size > 0 && parent_cohort_size <= max_arity,
        "parent_cohort_size must be positive and at most max_arity"
    );
    let upper_cohort_size = parent_cohort_size;
    let n = table.len() as Id;
    let slots = slots_per_super(table, max_arity, multiplier);

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (from_lower, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);
    if nth >= children_left {
        return NONE;
    }

    let remainder = rev_cohort_shuffle(from_lower + nth, max_arity, seed);

    let strict_cohort = parent_cohort / slots;
    let sub_cohort = parent_cohort % slots;
    let flat = cohort_outer(sub_cohort, remainder, max_arity);

    let bucket = table_bucket_for_scaled(table, flat, multiplier);
    let within_bucket = flat - table.prefix_before(bucket) * multiplier;
    let cohort_val = strict_cohort * n + bucket as Id;

    tabulated_cohort_outer_scaled(cohort_val, within_bucket, table, multiplier, seed)
}

pub fn count_select_table_children(parent: Id, parent_cohort_size: Id, max_arity: Id, seed: Id) -> Id {
    assert!(
        parent_cohort_size > 0 && parent_cohort_size <= max_arity,
        "parent_cohort_size must be positive and at most max_arity"
    );
    let upper_cohort_size = parent_cohort_size;

    let (parent_cohort, inner) = cohort_and_inner(parent, upper_cohort_size);
    let shuf = cohort_shuffle(inner, upper_cohort_size, seed);

    let (_, children_left) = descend_by_parent(parent_cohort, seed, upper_cohort_size, max_arity, shuf);
    children_left
}
