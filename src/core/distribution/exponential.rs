//! Exponentially crowded cohorts.
//!
//! The cohort is sliced into fixed-width sections; each section sends a
//! `shape`-dependent fraction of its members across to the adjacent cohort,
//! producing an exponential curve in occupancy. Inner-id continuity across
//! cohorts is sacrificed for this — the layer's contract is bijectivity, not
//! dense inner ranges.

use crate::core::cohort::{cohort, cohort_inner, cohort_outer};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::Id;

const SECTION_RESOLUTION: Id = 32;
const MIN_SECTION_COUNT: Id = 8;
const MIN_SECTION_RESOLUTION: Id = 4;

fn resolution_and_section_count(cohort_size: Id) -> (Id, Id) {
    let mut resolution = SECTION_RESOLUTION;
    let mut section_count = cohort_size / resolution;
    if section_count < MIN_SECTION_COUNT {
        resolution = cohort_size / MIN_SECTION_COUNT;
        if resolution < MIN_SECTION_RESOLUTION {
            resolution = MIN_SECTION_RESOLUTION;
        }
        section_count = cohort_size / resolution;
    }
    (resolution, section_count)
}

/// The number of positions in section `which` (of `sections`, each
/// `section_width` wide) that stay in their strict cohort rather than
/// crossing into the neighbor. Negative `shape` mirrors the section index,
/// giving a curve symmetric to the positive case.
pub fn exp_split(shape: f64, sections: Id, section_width: Id, which: Id) -> Id {
    let (shape, which) = if shape < 0.0 {
        (-shape, sections - which - 1)
    } else {
        (shape, which)
    };
    let x = which as f64 / sections as f64;
    let f = (shape.powf(-x) - 1.0 / shape) / (1.0 - 1.0 / shape);
    (section_width as f64 * f) as Id
}

/// Splits `outer` into an exponentially weighted `(cohort, inner)` pair.
pub fn exp_cohort_and_inner(outer: Id, shape: f64, cohort_size: Id, seed: Id) -> (Id, Id) {
    let (resolution, section_count) = resolution_and_section_count(cohort_size);

    let strict_cohort = cohort(outer, cohort_size);
    let strict_inner = cohort_inner(outer, cohort_size);

    let section = strict_inner / resolution;
    let in_section = strict_inner % resolution;
    let shuf = cohort_shuffle(in_section, resolution, seed + section);
    let split = exp_split(shape, section_count, resolution, section);
    let lower = shuf < split;

    let adjust: i64 = if lower { 0 } else if shape > 0.0 { 1 } else { -1 };
    let out_cohort = (strict_cohort as i64 + adjust) as Id;
    let out_inner = shuf + (section * resolution);
    (out_cohort, out_inner)
}

/// Inverse of [`exp_cohort_and_inner`].
pub fn exp_cohort_outer(cohort_val: Id, inner: Id, shape: f64, cohort_size: Id, seed: Id) -> Id {
    let (resolution, section_count) = resolution_and_section_count(cohort_size);

    let in_section = inner % resolution;
    let section = inner / resolution;

    let split = exp_split(shape, section_count, resolution, section);
    let lower = in_section < split;
    let adjust: i64 = if lower { 0 } else if shape > 0.0 { 1 } else { -1 };

    let strict_cohort = (cohort_val as i64 - adjust) as Id;
    let unshuf = rev_cohort_shuffle(in_section, resolution, seed + section);
    let strict_inner = (section * resolution) + unshuf;

    cohort_outer(strict_cohort, strict_inner, cohort_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_cohort_round_trips() {
        for shape in [0.5f64, 0.1, -0.3] {
            for outer in 0..(256u64 * 4) {
                let (c, i) = exp_cohort_and_inner(outer, shape, 256, 5);
                assert_eq!(exp_cohort_outer(c, i, shape, 256, 5), outer);
            }
        }
    }

    #[test]
    fn exp_split_is_monotone_for_positive_shape() {
        let sections = 8;
        let width = 32;
        let mut prev = exp_split(0.01, sections, width, 0);
        for which in 1..sections {
            let cur = exp_split(0.01, sections, width, which);
            assert!(cur <= prev, "exp_split should be monotone in `which`");
            prev = cur;
        }
    }
}
