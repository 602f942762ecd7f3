//! Birthdates and the mother/direct-child relationship: composes the
//! table-weighted selection layer with the age-gap offset that keeps every
//! child's id strictly above its parent's.

use tracing::warn;

use crate::core::cohort::{mixed_cohort, mixed_cohort_outer};
use crate::core::select::table::{
    count_select_table_children, select_table_nth_child, select_table_parent_and_index,
};
use crate::family::info::{FamilyInfo, ONE_EARTH_YEAR};
use crate::id::{child_bearer, is_child_bearer, non_child_bearer, Day, Id, NONE};

/// `acy_family_birth_age_table_multiplier` (`original_source`'s
/// `c/src/family/family.c:183-197`): scales the age-of-mother table's raw
/// bucket weights into real id-space widths. Distinct from
/// `max_children_per_mother` — it folds in the birth rate and a year's
/// worth of days, then rounds down to a multiple of the table's total
/// weight so every bucket boundary lands on an exact multiple of the
/// table-unit width (spec.md §9).
pub fn birth_age_table_multiplier(info: &FamilyInfo) -> Id {
    let table_total = info.birth_age_dist_sumtable.total();
    let per_mother_rate = info.birth_rate_per_day / info.max_children_per_mother;
    let raw = per_mother_rate * ONE_EARTH_YEAR;
    (raw / table_total) * table_total
}

/// `person`'s birthdate, in days since the implementation-defined epoch.
pub fn birthdate(person: Id, info: &FamilyInfo) -> Day {
    mixed_cohort(person, info.birth_rate_per_day, info.seed + 17) as Day
}

/// The first person (by id) born on `day`.
pub fn first_born_on(day: Day, info: &FamilyInfo) -> Id {
    mixed_cohort_outer(day as Id, 0, info.birth_rate_per_day, info.seed + 17)
}

/// The fixed offset that keeps every child's id strictly above its
/// parent's: `birth_rate_per_day * min_childbearing_age`.
pub fn child_id_adjust(info: &FamilyInfo) -> Id {
    info.birth_rate_per_day * info.min_childbearing_age
}

/// `person`'s mother, or `NONE` if `person` is itself `NONE`.
pub fn mother(person: Id, info: &FamilyInfo) -> Id {
    mother_and_index(person, info).0
}

/// `person`'s mother and the index `person` occupies among that mother's
/// direct children (see [`direct_child`]).
pub fn mother_and_index(person: Id, info: &FamilyInfo) -> (Id, Id) {
    if person == NONE {
        return (NONE, 0);
    }

    let adjust = child_id_adjust(info);
    if person < adjust {
        warn!(person, adjust, "mother_and_index: age-gap offset underflows, returning NONE");
        return (NONE, 0);
    }
    let adjusted = person - adjust;
    let multiplier = birth_age_table_multiplier(info);

    let (raw_mother, mut index) = select_table_parent_and_index(
        adjusted,
        info.mother_cohort_size,
        info.max_children_per_mother,
        &info.birth_age_dist_sumtable,
        multiplier,
        info.seed,
    );

    let the_mother = child_bearer(raw_mother);
    if raw_mother != the_mother {
        // `raw_mother` was the odd, non-child-bearing half of its duo;
        // `person` is one of the children attributed to that duo, which
        // come after all of the even member's own direct children.
        index += count_select_table_children(
            the_mother,
            info.mother_cohort_size,
            info.max_children_per_mother,
            info.seed,
        );
    }

    (the_mother, index)
}

/// The `nth` child directly attributed to `person`'s duo (before partner
/// reassignment — see [`crate::family::partner::child`] for the full
/// partner-aware relation). `NONE` if `person` isn't a child-bearer or
/// doesn't have that many direct children.
pub fn direct_child(person: Id, nth: Id, info: &FamilyInfo) -> Id {
    if !is_child_bearer(person) {
        return NONE;
    }

    let first_count = count_select_table_children(
        person,
        info.mother_cohort_size,
        info.max_children_per_mother,
        info.seed,
    );
    let multiplier = birth_age_table_multiplier(info);

    let child = if nth < first_count {
        select_table_nth_child(
            person,
            nth,
            info.mother_cohort_size,
            info.max_children_per_mother,
            &info.birth_age_dist_sumtable,
            multiplier,
            info.seed,
        )
    } else {
        select_table_nth_child(
            non_child_bearer(person),
            nth - first_count,
            info.mother_cohort_size,
            info.max_children_per_mother,
            &info.birth_age_dist_sumtable,
            multiplier,
            info.seed,
        )
    };

    if child == NONE {
        return NONE;
    }

    let adjust = child_id_adjust(info);
    let adjusted = child.wrapping_add(adjust);
    if adjusted < child {
        warn!(child, adjust, "direct_child: age-gap offset overflows, returning NONE");
        return NONE;
    }
    adjusted
}

/// The total number of children directly attributed to `person`'s duo
/// (both the even child-bearer and its odd non-child-bearing partner).
pub fn num_direct_children(person: Id, info: &FamilyInfo) -> Id {
    if person == NONE || !is_child_bearer(person) {
        return 0;
    }
    count_select_table_children(person, info.mother_cohort_size, info.max_children_per_mother, info.seed)
        + count_select_table_children(
            non_child_bearer(person),
            info.mother_cohort_size,
            info.max_children_per_mother,
            info.seed,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::info::DEFAULT_FAMILY_INFO;

    #[test]
    fn birthdate_first_born_on_round_trips() {
        let info = &*DEFAULT_FAMILY_INFO;
        for day in [0i64, 1, 100, 9999] {
            let person = first_born_on(day, info);
            assert_eq!(birthdate(person, info), day);
        }
    }

    #[test]
    fn birth_age_table_multiplier_matches_default_params() {
        let info = &*DEFAULT_FAMILY_INFO;
        // 9984 / 32 * 365 = 113_880, rounded down to a multiple of 737.
        assert_eq!(birth_age_table_multiplier(info), 113_498);
    }

    #[test]
    fn none_is_its_own_mother() {
        let info = &*DEFAULT_FAMILY_INFO;
        assert_eq!(mother(NONE, info), NONE);
    }

    #[test]
    fn mother_of_child_round_trips() {
        let info = &*DEFAULT_FAMILY_INFO;
        for person in 1_000_000u64..1_000_200 {
            let (m, idx) = mother_and_index(person, info);
            if m == NONE {
                continue;
            }
            assert_eq!(direct_child(m, idx, info), person);
        }
    }

    #[test]
    fn non_child_bearer_has_no_direct_children() {
        let info = &*DEFAULT_FAMILY_INFO;
        assert_eq!(num_direct_children(7, info), 0);
        assert_eq!(direct_child(7, 0, info), NONE);
    }
}
