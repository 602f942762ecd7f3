//! Partner assignment: how many partners a child-bearer has, who they are,
//! and which of a non-child-bearer's children belong to which partner.
//!
//! Ported from `original_source/c/src/family/family.c`'s four-cohort-case
//! scheme (`acy_get_cohort_case_parameters`, `acy_nth_potential_partner_and_index`,
//! `acy_num_partners`, `acy_nth_partner`), with two deviations from the
//! literal C documented in `DESIGN.md`: the cohort-case search actually
//! stops at the first accepted case (the source's loop never `break`s, so
//! it silently always resolves to the last case it considers), and the
//! age-gap check compares the two partners' birthdates directly rather
//! than a partner's birthdate against one child's, matching spec.md's own
//! definition of `min_partner_age`/`max_partner_age` as bounds on
//! partner-partner age difference.

use tracing::warn;

use crate::core::cohort::{mixed_cohort_and_inner, mixed_cohort_outer};
use crate::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};
use crate::core::unit::prng;
use crate::family::birth::{birthdate, direct_child, num_direct_children};
use crate::family::info::FamilyInfo;
use crate::id::{is_child_bearer, separated, Id, NONE};

/// The four cohorts a candidate partner can be drawn from, in the order
/// they're tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CohortCase {
    Likely,
    Unlikely,
    Full,
    Shifted,
}

const ALL_CASES: [CohortCase; 4] =
    [CohortCase::Likely, CohortCase::Unlikely, CohortCase::Full, CohortCase::Shifted];

impl CohortCase {
    fn from_index(which: Id) -> Self {
        match which {
            0 => CohortCase::Likely,
            1 => CohortCase::Unlikely,
            2 => CohortCase::Full,
            _ => CohortCase::Shifted,
        }
    }

    /// `(cohort_size, cohort_adjust, cohort_fraction)`: the low
    /// `cohort_fraction` positions of the cohort are left for the next
    /// (wider) case to claim; `cohort_adjust` shifts into the adjacent
    /// mixed cohort to bias toward a better-aged candidate.
    fn parameters(self, info: &FamilyInfo) -> (Id, Id, Id) {
        let likely = info.likely_partner_age_gap * info.birth_rate_per_day / 4;
        let unlikely = info.unlikely_partner_age_gap * info.birth_rate_per_day / 4;
        let full = (info.max_partner_age - info.min_partner_age) * info.birth_rate_per_day / 4;
        match self {
            CohortCase::Likely => (likely, 0, likely / info.likely_partner_likelihood),
            CohortCase::Unlikely => (unlikely, 0, unlikely / info.unlikely_partner_likelihood),
            CohortCase::Full => (full, 0, full),
            CohortCase::Shifted => (likely, 1, 0),
        }
    }
}

fn num_potential_partners(info: &FamilyInfo) -> Id {
    4 * info.max_partners_per_mother
}

/// Derives a candidate child-bearer and the partner-index `person` would
/// occupy among that candidate's partners, for potential-partner slot
/// `nth` (of `num_potential_partners`). Returns `(NONE, 0)` if slot `nth`
/// doesn't produce a usable candidate; the caller verifies the guess by
/// calling [`nth_partner`] on it and checking it names `person` back.
fn nth_potential_partner_and_index(person: Id, nth: Id, info: &FamilyInfo) -> (Id, Id) {
    if is_child_bearer(person) {
        return (NONE, 0);
    }

    let cohort_case = CohortCase::from_index(nth / info.max_partners_per_mother);
    let which_partner = nth % info.max_partners_per_mother;
    let (cohort_size, cohort_adjust, cohort_fraction) = cohort_case.parameters(info);

    let (cohort, inner) = mixed_cohort_and_inner(
        separated(person),
        cohort_size,
        info.seed + 83923 * which_partner,
    );
    if inner < cohort_fraction || cohort < cohort_adjust {
        return (NONE, 0);
    }
    // Inverts `nth_partner`'s `mixed_cohort_outer(cohort + cohort_adjust, ..., seed +
    // 83923 * which_partner)`: subtract the same adjust back off, then unwind the
    // original `mixed_cohort_and_inner(separated(candidate), ..., seed + 1827 *
    // which_partner)` call with its own seed, not the 83923 one used above.
    let cohort = cohort - cohort_adjust;
    let unshuf = rev_cohort_shuffle(inner, cohort_size, info.seed + 28999 * which_partner);
    let candidate_duo =
        mixed_cohort_outer(cohort, unshuf, cohort_size, info.seed + 1827 * which_partner);

    let candidate = candidate_duo * 2; // the duo's even, child-bearing half
    let num_actual = num_partners(candidate, info);
    if which_partner >= num_actual {
        return (NONE, 0);
    }

    let start = (candidate + info.seed) % num_actual;
    let adjusted = (which_partner + num_actual - start) % num_actual;
    (candidate, adjusted)
}

/// The number of partners `person` has.
pub fn num_partners(person: Id, info: &FamilyInfo) -> Id {
    if person == NONE {
        return 0;
    }
    if is_child_bearer(person) {
        let child_count = num_direct_children(person, info);
        let mut count = 1;
        let mut random = prng(person, info.seed + PARTNER_COUNT_SEED);
        while random % 100 < info.multiple_partners_percent && count < child_count {
            count += 1;
            random = prng(random, info.seed + PARTNER_COUNT_SEED + count);
        }
        count
    } else {
        let mut total = 0;
        for nth in 0..num_potential_partners(info) {
            let (candidate, partner_index) = nth_potential_partner_and_index(person, nth, info);
            if candidate == NONE {
                continue;
            }
            if nth_partner(candidate, partner_index, info) == person {
                total += 1;
            }
        }
        total
    }
}

const PARTNER_COUNT_SEED: Id = 48935729874918238;

/// `person`'s `nth` partner (0-indexed), or `NONE` if they have fewer than
/// `nth + 1` partners.
pub fn nth_partner(person: Id, nth: Id, info: &FamilyInfo) -> Id {
    if is_child_bearer(person) {
        let child_count = num_direct_children(person, info);
        if nth >= child_count {
            return NONE;
        }
        let num_partners_ct = num_partners(person, info);
        let which_partner = (nth + person + info.seed) % num_partners_ct;

        for cohort_case in ALL_CASES {
            let (cohort_size, cohort_adjust, cohort_fraction) = cohort_case.parameters(info);

            let (cohort, inner) = mixed_cohort_and_inner(
                separated(person),
                cohort_size,
                info.seed + 1827 * which_partner,
            );
            let shuf = cohort_shuffle(inner, cohort_size, info.seed + 28999 * which_partner);
            if shuf < cohort_fraction {
                continue;
            }

            let sep_match = mixed_cohort_outer(
                cohort + cohort_adjust,
                shuf,
                cohort_size,
                info.seed + 83923 * which_partner,
            );
            let candidate = sep_match * 2 + 1; // the duo's odd, non-child-bearing half

            let gap = (birthdate(person, info) - birthdate(candidate, info)).abs();
            if (gap as Id) < info.min_partner_age {
                if cohort_case == CohortCase::Shifted {
                    warn!(
                        person,
                        candidate, "nth_partner: shifted cohort still failed the minimum age gap"
                    );
                }
                continue;
            }
            return candidate;
        }
        NONE
    } else {
        let mut remaining = nth + 1;
        for any in 0..num_potential_partners(info) {
            let (candidate, partner_index) = nth_potential_partner_and_index(person, any, info);
            if candidate == NONE {
                continue;
            }
            if nth_partner(candidate, partner_index, info) == person {
                remaining -= 1;
                if remaining == 0 {
                    return candidate;
                }
            }
        }
        NONE
    }
}

/// How many of `parent`'s direct children belong to partner `partner_index`
/// (a round-robin split with a per-parent phase shift, leftovers going to
/// the earliest partners).
fn children_with_partner(parent: Id, partner_index: Id, info: &FamilyInfo) -> Id {
    let num_partners_ct = num_partners(parent, info);
    if num_partners_ct == 0 {
        return 0;
    }
    let child_count = num_direct_children(parent, info);
    let mut share = child_count / num_partners_ct;
    let leftovers = child_count - num_partners_ct * share;
    if partner_index < leftovers {
        share += 1;
    }
    share
}

/// `person`'s `nth` child (0-indexed), following partners for
/// non-child-bearers the way [`crate::family::birth::direct_child`]
/// follows the duo for child-bearers.
pub fn child(person: Id, nth: Id, info: &FamilyInfo) -> Id {
    if is_child_bearer(person) {
        return direct_child(person, nth, info);
    }

    let mut remaining = nth;
    for any in 0..num_potential_partners(info) {
        let (candidate, partner_index) = nth_potential_partner_and_index(person, any, info);
        if candidate == NONE {
            continue;
        }
        if nth_partner(candidate, partner_index, info) != person {
            continue;
        }
        let num_partners_ct = num_partners(candidate, info);
        let with_this_partner = children_with_partner(candidate, partner_index, info);
        if remaining < with_this_partner {
            return direct_child(candidate, num_partners_ct * remaining + partner_index, info);
        }
        remaining -= with_this_partner;
    }
    NONE
}

/// The total number of children attributed to `person`: direct children
/// for a child-bearer, or the sum across every partner for a
/// non-child-bearer.
pub fn num_children(person: Id, info: &FamilyInfo) -> Id {
    if is_child_bearer(person) {
        return num_direct_children(person, info);
    }

    let mut total = 0;
    for any in 0..num_potential_partners(info) {
        let (candidate, partner_index) = nth_potential_partner_and_index(person, any, info);
        if candidate == NONE {
            continue;
        }
        if nth_partner(candidate, partner_index, info) != person {
            continue;
        }
        total += children_with_partner(candidate, partner_index, info);
    }
    total
}
