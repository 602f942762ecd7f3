//! Cross-module sanity checks for the unit layer, sampled over a much
//! wider range of inputs than the colocated unit tests bother with.

use kinfolk::core::unit::{irrev_smooth_prng, prng, rev_prng};

use rand::Rng;

#[test]
fn prng_round_trips_over_random_samples() {
    let mut rng = rand::rng();
    for _ in 0..10_000 {
        let x: u64 = rng.random();
        let seed: u64 = rng.random();
        let scrambled = prng(x, seed);
        assert_eq!(rev_prng(scrambled, seed), x);
    }
}

#[test]
fn prng_is_not_the_identity_almost_everywhere() {
    let mut rng = rand::rng();
    let mut identical = 0;
    for _ in 0..1_000 {
        let x: u64 = rng.random();
        if prng(x, 42) == x {
            identical += 1;
        }
    }
    assert!(identical < 10, "prng should scramble nearly every input, got {identical} fixed points");
}

#[test]
fn smooth_prng_averages_toward_the_middle_of_its_range() {
    let limit = 1000u64;
    let samples: Vec<u64> = (0..5_000u64)
        .map(|x| irrev_smooth_prng(x, limit, 4, 7))
        .collect();
    let mean: f64 = samples.iter().sum::<u64>() as f64 / samples.len() as f64;
    // smoothing several prng draws should keep the mean well inside the
    // range, not hugging either edge.
    assert!(mean > limit as f64 * 0.3 && mean < limit as f64 * 0.7, "mean was {mean}");
}
