//! Uniform, mixed, and biased cohort partitioning.
//!
//! A "strict" cohort is the flat `outer / size`, `outer % size` split. Mixed
//! and biased cohorts draw from a double-wide window straddling two adjacent
//! strict cohorts so that boundary effects smear instead of falling on a hard
//! edge.

use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::Id;

/// The maximum admissible bias value for [`biased_cohort_and_inner`]; bias
/// must lie in `[1, MAX_BIAS)`.
pub const MAX_BIAS: Id = 32;
pub const MID_BIAS: Id = 16;

/// `outer / size`.
pub fn cohort(outer: Id, cohort_size: Id) -> Id {
    outer / cohort_size
}

/// `outer % size`.
pub fn cohort_inner(outer: Id, cohort_size: Id) -> Id {
    outer % cohort_size
}

/// Both halves of [`cohort`]/[`cohort_inner`] at once.
pub fn cohort_and_inner(outer: Id, cohort_size: Id) -> (Id, Id) {
    (cohort(outer, cohort_size), cohort_inner(outer, cohort_size))
}

/// Inverse of [`cohort_and_inner`]: `cohort * size + inner`.
pub fn cohort_outer(cohort: Id, inner: Id, cohort_size: Id) -> Id {
    cohort * cohort_size + inner
}

/// Draws a cohort that overlaps two adjacent strict cohorts 50/50: each
/// strict cohort is shuffled and its lower half promoted into the next
/// mixed cohort, so the inner id carried forward is the shuffle result
/// itself (its low half marks "comes from the next strict cohort up").
pub fn mixed_cohort_and_inner(outer: Id, cohort_size: Id, seed: Id) -> (Id, Id) {
    let strict_cohort = cohort(outer, cohort_size);
    let strict_inner = cohort_inner(outer, cohort_size);
    let shuf = cohort_shuffle(strict_inner, cohort_size, seed + strict_cohort);
    let lower = shuf < cohort_size / 2;
    let mixed_cohort = if lower { strict_cohort + 1 } else { strict_cohort };
    (mixed_cohort, shuf)
}

pub fn mixed_cohort(outer: Id, cohort_size: Id, seed: Id) -> Id {
    mixed_cohort_and_inner(outer, cohort_size, seed).0
}

pub fn mixed_cohort_inner(outer: Id, cohort_size: Id, seed: Id) -> Id {
    mixed_cohort_and_inner(outer, cohort_size, seed).1
}

/// Inverse of [`mixed_cohort_and_inner`].
pub fn mixed_cohort_outer(cohort_val: Id, inner: Id, cohort_size: Id, seed: Id) -> Id {
    let lower = inner < cohort_size / 2;
    let strict_cohort = if lower { cohort_val - 1 } else { cohort_val };
    let unshuf = rev_cohort_shuffle(inner, cohort_size, seed + strict_cohort);
    cohort_outer(strict_cohort, unshuf, cohort_size)
}

/// Like [`mixed_cohort_and_inner`] but with a controllable split point:
/// `bias` must be in `[1, MAX_BIAS)`; `MID_BIAS` reproduces the even 50/50
/// split.
pub fn biased_cohort_and_inner(outer: Id, bias: Id, cohort_size: Id, seed: Id) -> (Id, Id) {
    assert!(bias > 0, "bias must be positive");
    assert!(bias < MAX_BIAS, "bias must be below MAX_BIAS");

    let strict_cohort = cohort(outer, cohort_size);
    let strict_inner = cohort_inner(outer, cohort_size);
    let shuf = cohort_shuffle(strict_inner, cohort_size, seed + strict_cohort);
    let split = (cohort_size * (MAX_BIAS - bias)) / MAX_BIAS;
    let lower = shuf < split;
    let biased_cohort = if lower { strict_cohort + 1 } else { strict_cohort };
    (biased_cohort, shuf)
}

/// Inverse of [`biased_cohort_and_inner`].
pub fn biased_cohort_outer(cohort_val: Id, inner: Id, bias: Id, cohort_size: Id, seed: Id) -> Id {
    assert!(bias > 0, "bias must be positive");
    assert!(bias < MAX_BIAS, "bias must be below MAX_BIAS");

    let split = (cohort_size * (MAX_BIAS - bias)) / MAX_BIAS;
    let lower = inner < split;
    let strict_cohort = if lower { cohort_val - 1 } else { cohort_val };
    let unshuf = rev_cohort_shuffle(inner, cohort_size, seed + strict_cohort);
    cohort_outer(strict_cohort, unshuf, cohort_size)
}

/// Snaps a fractional bias `f ∈ [0, 1]` into the discrete `[1, MAX_BIAS)`
/// range [`biased_cohort_and_inner`] expects.
pub fn nearest_bias(f: f64) -> Id {
    let result = (MAX_BIAS as f64 * f).round() as i64;
    if result < 1 {
        1
    } else if result >= MAX_BIAS as i64 {
        MAX_BIAS - 1
    } else {
        result as Id
    }
}
