//! `FamilyInfo`: the one piece of external configuration the whole system
//! takes, plus the literal default parameters (including the age-of-mother
//! distribution) recovered from `original_source`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::distribution::table::SumTable;
use crate::id::Id;

/// Days in a year; used throughout to express ages in years as day counts.
pub const ONE_EARTH_YEAR: Id = 365;

/// Plain, serializable configuration for a [`FamilyInfo`]. Kept separate
/// from `FamilyInfo` itself so the owned [`SumTable`] doesn't need to
/// round-trip through serde on every load — callers hand over the raw
/// prefix-sum vector and [`FamilyInfo::new`] builds the table once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyParams {
    pub seed: Id,
    pub birth_rate_per_day: Id,
    pub min_childbearing_age: Id,
    pub max_childbearing_age: Id,
    pub mother_cohort_size: Id,
    pub max_children_per_mother: Id,
    /// Prefix sum of the age-of-mother distribution; `[0] == 0`, length
    /// `N + 1` (the "off-by-one intentional" convention from
    /// `original_source`).
    pub birth_age_dist_sumtable: Vec<Id>,
    pub max_partners_per_mother: Id,
    pub likely_partner_age_gap: Id,
    pub unlikely_partner_age_gap: Id,
    pub min_partner_age: Id,
    pub max_partner_age: Id,
    pub likely_partner_likelihood: Id,
    pub unlikely_partner_likelihood: Id,
    pub multiple_partners_percent: Id,
}

/// Immutable, validated family configuration. Every family-layer function
/// takes one of these by reference; none of them mutate it.
#[derive(Debug, Clone)]
pub struct FamilyInfo {
    pub seed: Id,
    pub birth_rate_per_day: Id,
    pub min_childbearing_age: Id,
    pub max_childbearing_age: Id,
    pub mother_cohort_size: Id,
    pub max_children_per_mother: Id,
    pub birth_age_dist_sumtable: SumTable,
    pub max_partners_per_mother: Id,
    pub likely_partner_age_gap: Id,
    pub unlikely_partner_age_gap: Id,
    pub min_partner_age: Id,
    pub max_partner_age: Id,
    pub likely_partner_likelihood: Id,
    pub unlikely_partner_likelihood: Id,
    pub multiple_partners_percent: Id,
}

impl FamilyParams {
    /// Deserializes a `FamilyParams` from a JSON document, the configuration
    /// format a deployment would actually hand this crate (spec.md defines
    /// no wire format of its own; JSON via `serde_json` is the ambient
    /// choice, matching how the teacher's own `WorldGenConfig` round-trips
    /// through `serde_json` for saved-world manifests).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes back to JSON, the inverse of [`FamilyParams::from_json`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FamilyInfo {
    /// Builds a validated `FamilyInfo` from `params`, panicking if any
    /// configuration invariant from spec §3/§6/§9 is violated. Per §7,
    /// configuration violations are programmer error and abort at
    /// construction rather than surfacing as a runtime `NONE`.
    pub fn new(params: FamilyParams) -> Self {
        assert!(
            params.min_childbearing_age < params.max_childbearing_age,
            "min_childbearing_age must be less than max_childbearing_age"
        );
        assert!(
            params.mother_cohort_size == params.max_children_per_mother,
            "mother_cohort_size : max_children_per_mother ratio other than 1 is unimplemented \
             (nonlinear birthday assignment schemes are out of scope)"
        );
        assert!(
            params.max_partners_per_mother < params.max_children_per_mother,
            "max_partners_per_mother must be strictly less than max_children_per_mother"
        );
        assert!(
            params.multiple_partners_percent <= 100,
            "multiple_partners_percent must be a percentage in 0..=100"
        );
        assert!(
            params.likely_partner_likelihood > 0 && params.unlikely_partner_likelihood > 0,
            "partner likelihood denominators must be positive"
        );
        assert!(
            params.birth_age_dist_sumtable.first() == Some(&0),
            "birth_age_dist_sumtable must be a prefix sum starting at 0"
        );

        let birth_age_dist_sumtable = SumTable::from_prefix_sum(params.birth_age_dist_sumtable);

        FamilyInfo {
            seed: params.seed,
            birth_rate_per_day: params.birth_rate_per_day,
            min_childbearing_age: params.min_childbearing_age,
            max_childbearing_age: params.max_childbearing_age,
            mother_cohort_size: params.mother_cohort_size,
            max_children_per_mother: params.max_children_per_mother,
            birth_age_dist_sumtable,
            max_partners_per_mother: params.max_partners_per_mother,
            likely_partner_age_gap: params.likely_partner_age_gap,
            unlikely_partner_age_gap: params.unlikely_partner_age_gap,
            min_partner_age: params.min_partner_age,
            max_partner_age: params.max_partner_age,
            likely_partner_likelihood: params.likely_partner_likelihood,
            unlikely_partner_likelihood: params.unlikely_partner_likelihood,
            multiple_partners_percent: params.multiple_partners_percent,
        }
    }
}

/// The age-of-mother distribution's prefix sum, off-by-one intentional
/// (length 41 for 40 one-year buckets spanning ages 15..55): entry `k` is
/// the cumulative count of mothers at ages below `15 + k`.
const DEFAULT_BIRTH_AGE_SUMTABLE: [Id; 41] = [
    0, 1, 2, 3, 4, //
    5, 6, 7, 9, 13, //
    20, 29, 39, 50, 66, //
    86, 110, 137, 167, 199, //
    234, 271, 310, 350, 389, //
    427, 464, 500, 535, 569, //
    600, 629, 656, 681, 704, //
    721, 730, 733, 735, 736, //
    737,
];

/// The literal default parameters used throughout `original_source`,
/// recovered since spec.md describes the shapes of these parameters but
/// not their concrete values.
pub static DEFAULT_FAMILY_INFO: LazyLock<FamilyInfo> = LazyLock::new(|| {
    FamilyInfo::new(FamilyParams {
        seed: 9728182391,
        birth_rate_per_day: 9984,
        min_childbearing_age: 15 * ONE_EARTH_YEAR,
        max_childbearing_age: 55 * ONE_EARTH_YEAR,
        mother_cohort_size: 32,
        max_children_per_mother: 32,
        birth_age_dist_sumtable: DEFAULT_BIRTH_AGE_SUMTABLE.to_vec(),
        max_partners_per_mother: 16,
        likely_partner_age_gap: 3 * ONE_EARTH_YEAR,
        unlikely_partner_age_gap: 7 * ONE_EARTH_YEAR,
        min_partner_age: 15 * ONE_EARTH_YEAR,
        max_partner_age: 65 * ONE_EARTH_YEAR,
        likely_partner_likelihood: 6,
        unlikely_partner_likelihood: 4,
        multiple_partners_percent: 21,
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_family_info_builds() {
        let info = &*DEFAULT_FAMILY_INFO;
        assert_eq!(info.mother_cohort_size, info.max_children_per_mother);
        assert_eq!(info.birth_age_dist_sumtable.total(), 737);
    }

    #[test]
    #[should_panic(expected = "ratio other than 1")]
    fn rejects_unequal_cohort_ratio() {
        let mut params = default_params();
        params.mother_cohort_size = 16;
        FamilyInfo::new(params);
    }

    #[test]
    #[should_panic(expected = "max_partners_per_mother must be")]
    fn rejects_too_many_partners() {
        let mut params = default_params();
        params.max_partners_per_mother = params.max_children_per_mother;
        FamilyInfo::new(params);
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = default_params();
        let json = params.to_json().expect("serialization should succeed");
        let restored = FamilyParams::from_json(&json).expect("deserialization should succeed");
        assert_eq!(restored.seed, params.seed);
        assert_eq!(restored.birth_age_dist_sumtable, params.birth_age_dist_sumtable);
        // the restored params should still pass construction-time validation.
        FamilyInfo::new(restored);
    }

    fn default_params() -> FamilyParams {
        FamilyParams {
            seed: 1,
            birth_rate_per_day: 9984,
            min_childbearing_age: 15 * ONE_EARTH_YEAR,
            max_childbearing_age: 55 * ONE_EARTH_YEAR,
            mother_cohort_size: 32,
            max_children_per_mother: 32,
            birth_age_dist_sumtable: DEFAULT_BIRTH_AGE_SUMTABLE.to_vec(),
            max_partners_per_mother: 16,
            likely_partner_age_gap: 3 * ONE_EARTH_YEAR,
            unlikely_partner_age_gap: 7 * ONE_EARTH_YEAR,
            min_partner_age: 15 * ONE_EARTH_YEAR,
            max_partner_age: 65 * ONE_EARTH_YEAR,
            likely_partner_likelihood: 6,
            unlikely_partner_likelihood: 4,
            multiple_partners_percent: 21,
        }
    }
}
