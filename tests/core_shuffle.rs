//! Cross-module checks for [`kinfolk::core::shuffle`]: round-tripping over a
//! wide spread of cohort sizes and seeds, and confirming the composed
//! shuffle is actually a permutation (not just individually invertible).

use kinfolk::core::shuffle::{cohort_shuffle, rev_cohort_shuffle};

use rand::Rng;

#[test]
fn cohort_shuffle_round_trips_over_random_sizes_and_seeds() {
    let mut rng = rand::rng();
    for _ in 0..2_000 {
        let n = rng.random_range(2u64..5_000);
        let seed: u64 = rng.random();
        let i = rng.random_range(0..n);
        assert_eq!(rev_cohort_shuffle(cohort_shuffle(i, n, seed), n, seed), i);
    }
}

#[test]
fn cohort_shuffle_is_a_permutation_for_several_sizes() {
    for n in [2u64, 3, 9, 17, 64, 257] {
        for seed in [0u64, 5, 12345] {
            let mut seen: Vec<u64> = (0..n).map(|i| cohort_shuffle(i, n, seed)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..n).collect::<Vec<_>>(), "n={n} seed={seed} was not a permutation");
        }
    }
}
