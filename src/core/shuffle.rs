//! Reversible permutations of `[0, cohort_size)`.
//!
//! Each primitive here permutes a single cohort; [`cohort_shuffle`] composes
//! all of them into one seeded permutation used throughout the cohort and
//! distribution layers.

use crate::id::Id;

const MIN_REGION_SIZE: Id = 2;
const MAX_REGION_COUNT: Id = 16;

/// Folds the top half of the cohort into the bottom half by alternation:
/// even slot `2j` receives `j`, odd slot `2j+1` receives `n-1-j`.
pub fn interleave(inner: Id, cohort_size: Id) -> Id {
    if inner < (cohort_size + 1) / 2 {
        inner * 2
    } else {
        (cohort_size - 1 - inner) * 2 + 1
    }
}

/// Inverse of [`interleave`].
pub fn rev_interleave(shuffled: Id, cohort_size: Id) -> Id {
    if shuffled % 2 != 0 {
        cohort_size - 1 - shuffled / 2
    } else {
        shuffled / 2
    }
}

/// Picks a split point in `[n/2, n)` forced odd and swings everything past it
/// into the middle of the cohort.
pub fn fold_perm(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let half = cohort_size >> 1;
    let mut split = (seed % half) + half;
    let mut after = cohort_size - split;
    split += (after + 1) % 2;
    after = cohort_size - split;

    if inner < half - after / 2 {
        inner
    } else if inner >= split {
        (half - after / 2) + (inner - split)
    } else {
        inner + after
    }
}

/// Inverse of [`fold_perm`].
pub fn rev_fold_perm(folded: Id, cohort_size: Id, seed: Id) -> Id {
    let half = cohort_size >> 1;
    let mut split = (seed % half) + half;
    let mut after = cohort_size - split;
    split += (after + 1) % 2;
    after = cohort_size - split;

    if folded < half - after / 2 {
        folded
    } else if folded > half + after / 2 {
        folded - after
    } else {
        split + (folded - (half - after / 2))
    }
}

/// A circular offset: `(i + seed) mod n`.
pub fn spin(inner: Id, cohort_size: Id, seed: Id) -> Id {
    (inner + seed) % cohort_size
}

/// Inverse of [`spin`].
pub fn rev_spin(spun: Id, cohort_size: Id, seed: Id) -> Id {
    (spun + (cohort_size - (seed % cohort_size))) % cohort_size
}

/// Partitions the cohort into blocks of size `(seed mod (n/8+4)) + 2` and
/// swaps each adjacent block pair when both lie fully inside the cohort.
/// Self-inverse.
pub fn flop_perm(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let mut limit = cohort_size >> 3;
    if limit < 4 {
        limit += 4;
    }
    let size = (seed % limit) + 2;

    let which = inner / size;
    let local = inner % size;
    let odd = which % 2 != 0;

    let result = if odd {
        (which - 1) * size + local
    } else {
        (which + 1) * size + local
    };

    if result >= cohort_size { inner } else { result }
}

/// Spins even and odd positions independently, using distinct seed offsets
/// so the two parities decorrelate.
pub fn mix(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let even = inner - inner % 2;
    if inner % 2 != 0 {
        let target = spin(even / 2, (cohort_size + (1 - cohort_size % 2)) / 2, seed + 464185);
        2 * target + 1
    } else {
        let target = spin(even / 2, (cohort_size + 1) / 2, seed + 1048239);
        2 * target
    }
}

/// Inverse of [`mix`].
pub fn rev_mix(mixed: Id, cohort_size: Id, seed: Id) -> Id {
    let even = mixed - mixed % 2;
    if mixed % 2 != 0 {
        let target = rev_spin(even / 2, (cohort_size + (1 - cohort_size % 2)) / 2, seed + 464185);
        2 * target + 1
    } else {
        let target = rev_spin(even / 2, (cohort_size + 1) / 2, seed + 1048239);
        2 * target
    }
}

fn region_count(cohort_size: Id, seed: Id) -> Id {
    let min_regions = 2 - ((cohort_size < 2 * MIN_REGION_SIZE) as Id);
    let max_regions = 1 + cohort_size / MIN_REGION_SIZE;
    min_regions + (seed % (1 + (max_regions - min_regions))) % MAX_REGION_COUNT
}

/// Deals positions into `r` regions round-robin, with leftover slots placed
/// at the front.
pub fn spread(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let regions = region_count(cohort_size, seed);
    let region_size = cohort_size / regions;
    let leftovers = cohort_size - regions * region_size;

    let region = inner % regions;
    let index = inner / regions;
    if index < region_size {
        region * region_size + index + leftovers
    } else {
        inner - regions * region_size
    }
}

/// Inverse of [`spread`].
pub fn rev_spread(spread_val: Id, cohort_size: Id, seed: Id) -> Id {
    let regions = region_count(cohort_size, seed);
    let region_size = cohort_size / regions;
    let leftovers = cohort_size - regions * region_size;

    if spread_val < leftovers {
        regions * region_size + spread_val
    } else {
        let index = (spread_val - leftovers) / region_size;
        let region = (spread_val - leftovers) % region_size;
        region * regions + index
    }
}

/// Reverses index order within each of `r` fragments. Self-inverse.
pub fn upend(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let regions = region_count(cohort_size, seed);
    let region_size = cohort_size / regions;

    let region = inner / region_size;
    let index = inner % region_size;
    let result = region * region_size + (region_size - 1 - index);

    if result < cohort_size { result } else { inner }
}

/// The fixed 16-step composition used as the cohort-level shuffle throughout
/// the distribution and selection layers. Order matters; [`rev_cohort_shuffle`]
/// applies the exact mirror composition.
pub fn cohort_shuffle(inner: Id, cohort_size: Id, seed: Id) -> Id {
    let seed = seed ^ (cohort_size / 3);
    let r = inner;
    let r = spread(r, cohort_size, seed + 453);
    let r = mix(r, cohort_size, seed + 2891);
    let r = interleave(r, cohort_size);
    let r = spin(r, cohort_size, seed + 1982);
    let r = upend(r, cohort_size, seed + 47);
    let r = fold_perm(r, cohort_size, seed + 837);
    let r = interleave(r, cohort_size);
    let r = flop_perm(r, cohort_size, seed + 53);
    let r = fold_perm(r, cohort_size, seed + 201);
    let r = mix(r, cohort_size, seed + 728);
    let r = spread(r, cohort_size, seed + 881);
    let r = interleave(r, cohort_size);
    let r = flop_perm(r, cohort_size, seed + 192);
    let r = upend(r, cohort_size, seed + 794614);
    spin(r, cohort_size, seed + 19)
}

/// Inverse of [`cohort_shuffle`].
pub fn rev_cohort_shuffle(shuffled: Id, cohort_size: Id, seed: Id) -> Id {
    let seed = seed ^ (cohort_size / 3);
    let r = shuffled;
    let r = rev_spin(r, cohort_size, seed + 19);
    let r = upend(r, cohort_size, seed + 794614);
    let r = flop_perm(r, cohort_size, seed + 192);
    let r = rev_interleave(r, cohort_size);
    let r = rev_spread(r, cohort_size, seed + 881);
    let r = rev_mix(r, cohort_size, seed + 728);
    let r = rev_fold_perm(r, cohort_size, seed + 201);
    let r = flop_perm(r, cohort_size, seed + 53);
    let r = rev_interleave(r, cohort_size);
    let r = rev_fold_perm(r, cohort_size, seed + 837);
    let r = upend(r, cohort_size, seed + 47);
    let r = rev_spin(r, cohort_size, seed + 1982);
    let r = rev_interleave(r, cohort_size);
    let r = rev_mix(r, cohort_size, seed + 2891);
    rev_spread(r, cohort_size, seed + 453)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_round_trips() {
        for n in [2u64, 3, 7, 8, 31] {
            for i in 0..n {
                assert_eq!(rev_interleave(interleave(i, n), n), i);
            }
        }
    }

    #[test]
    fn fold_perm_round_trips() {
        for n in [8u64, 16, 31] {
            for seed in [0u64, 1, 99] {
                for i in 0..n {
                    assert_eq!(rev_fold_perm(fold_perm(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn spin_round_trips() {
        for n in [2u64, 5, 16] {
            for seed in [0u64, 3, 41] {
                for i in 0..n {
                    assert_eq!(rev_spin(spin(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn flop_perm_is_self_inverse() {
        for n in [16u64, 32, 100] {
            for seed in [0u64, 5, 12] {
                for i in 0..n {
                    assert_eq!(flop_perm(flop_perm(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn mix_round_trips() {
        for n in [8u64, 9, 32] {
            for seed in [0u64, 7, 123] {
                for i in 0..n {
                    assert_eq!(rev_mix(mix(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn spread_round_trips() {
        for n in [8u64, 17, 64] {
            for seed in [0u64, 2, 55] {
                for i in 0..n {
                    assert_eq!(rev_spread(spread(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn upend_is_self_inverse() {
        for n in [8u64, 17, 64] {
            for seed in [0u64, 9, 200] {
                for i in 0..n {
                    assert_eq!(upend(upend(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn cohort_shuffle_round_trips() {
        for n in [2u64, 8, 16, 32, 101] {
            for seed in [0u64, 1, 9728182391 % 1_000_000] {
                for i in 0..n {
                    assert_eq!(rev_cohort_shuffle(cohort_shuffle(i, n, seed), n, seed), i);
                }
            }
        }
    }

    #[test]
    fn cohort_shuffle_8_is_a_permutation() {
        let mut seen: Vec<Id> = (0..8).map(|i| cohort_shuffle(i, 8, 0)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }
}
