//! Layered exponential cohorts.
//!
//! Where [`crate::core::distribution::exponential`] computes a single
//! stay/cross split per section, this variant computes `n_layers` nested
//! splits and reports which layer a position falls into, smearing
//! contributions across `2 * n_layers + 1` neighboring cohorts for a
//! smoother empirical distribution.

use crate::core::cohort::{cohort_and_inner, cohort_outer};
use crate::core::distribution::exponential::exp_split;
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::id::{Id, NONE};

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

/// Like [`exp_split`] but offset so that `layer` selects one of `n_layers`
/// nested splits within the same section.
pub fn multi_exp_split(
    shape: f64,
    sections: Id,
    section_width: Id,
    which: Id,
    layer: Id,
    n_layers: Id,
) -> Id {
    let layer_width = sections / n_layers;
    let adjust: i64 = if shape > 0.0 {
        sections as i64 - (layer * layer_width) as i64
    } else {
        -(sections as i64) + (layer * layer_width) as i64
    };
    let shifted_which = (which as i64 + adjust) as Id;
    exp_split(shape, sections, section_width, shifted_which)
}

/// Determines which layer `in_section` falls into, in `[0, 2*n_layers+1)`.
pub fn multi_exp_get_layer(
    in_section: Id,
    shape: f64,
    sections: Id,
    section_width: Id,
    which: Id,
    n_layers: Id,
) -> Id {
    let mut layer: Id = 0;
    let mut last_split: Id = 0;
    loop {
        let split = multi_exp_split(shape, sections, section_width, which, layer, n_layers);
        if split < last_split {
            layer += 1;
            break;
        }
        last_split = split;
        layer += 1;
        if !(in_section >= split && layer < n_layers * 2 + 1) {
            break;
        }
    }
    layer - 1
}

/// Splits `outer` into a layered-exponential `(cohort, inner)` pair, or
/// `(NONE, NONE)` if the layer adjustment overflows the cohort space.
pub fn multiexp_cohort_and_inner(
    outer: Id,
    shape: f64,
    cohort_size: Id,
    n_layers: Id,
    seed: Id,
) -> (Id, Id) {
    let (resolution, section_count) = resolution_and_section_count(cohort_size);
    let leftovers = cohort_size - section_count * resolution;

    let (strict_cohort, strict_inner) = cohort_and_inner(outer, cohort_size);

    let section = strict_inner / resolution;
    let in_section = strict_inner % resolution;

    let shuf = if section < section_count {
        cohort_shuffle(in_section, resolution, seed + section)
    } else {
        cohort_shuffle(in_section, leftovers, seed + section)
    };

    let layer = multi_exp_get_layer(shuf, shape, section_count, resolution, section, n_layers);

    let adjusted = strict_cohort * n_layers + layer;
    if adjusted < strict_cohort {
        return (NONE, NONE);
    }
    (adjusted, shuf + (section * resolution))
}

/// Inverse of [`multiexp_cohort_and_inner`], or `NONE` if the layer
/// adjustment underflows.
pub fn multiexp_cohort_outer(
    cohort_val: Id,
    inner: Id,
    shape: f64,
    cohort_size: Id,
    n_layers: Id,
    seed: Id,
) -> Id {
    let (resolution, section_count) = resolution_and_section_count(cohort_size);
    let leftovers = cohort_size - section_count * resolution;

    let in_section = inner % resolution;
    let section = inner / resolution;

    let layer = multi_exp_get_layer(in_section, shape, section_count, resolution, section, n_layers);

    if cohort_val < layer {
        return NONE;
    }
    let strict_cohort = (cohort_val - layer) / n_layers;

    let unshuf = if section < section_count {
        rev_cohort_shuffle(in_section, resolution, seed + section)
    } else {
        rev_cohort_shuffle(in_section, leftovers, seed + section)
    };

    let strict_inner = (section * resolution) + unshuf;
    cohort_outer(strict_cohort, strict_inner, cohort_size)
}
