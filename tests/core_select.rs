//! Cross-module checks for the selection layer: the parent↔(child,index)
//! round-trip (spec.md §8 item 6) and the concrete
//! `select_nth_child(P, count_select_children(P, ...), ...) = NONE` scenario,
//! sampled widely rather than over the handful of cases the colocated unit
//! tests in `core::select::uniform` already cover.

use kinfolk::core::select::exponential::{
    count_select_exp_children, select_exp_nth_child, select_exp_parent_and_index, ExpShape,
};
use kinfolk::core::select::polynomial::{
    count_select_poly_children, select_poly_nth_child, select_poly_parent_and_index, PolyShape,
};
use kinfolk::core::select::table::{
    count_select_table_children, select_table_nth_child, select_table_parent_and_index,
};
use kinfolk::core::select::uniform::{count_select_children, select_nth_child, select_parent_and_index};
use kinfolk::core::distribution::table::SumTable;
use kinfolk::id::NONE;

use rand::Rng;

#[test]
fn uniform_selection_count_boundary_is_none_over_random_parents() {
    let mut rng = rand::rng();
    for _ in 0..2_000 {
        let parent: u64 = rng.random();
        let count = count_select_children(parent, 2, 16, 99);
        assert_eq!(select_nth_child(parent, count, 2, 16, 99), NONE);
    }
}

#[test]
fn uniform_selection_round_trips_over_random_parents() {
    let mut rng = rand::rng();
    for _ in 0..2_000 {
        let parent: u64 = rng.random_range(0..1_000_000);
        let count = count_select_children(parent, 2, 16, 99);
        for nth in 0..count {
            let child = select_nth_child(parent, nth, 2, 16, 99);
            if child == NONE {
                continue;
            }
            let (recovered_parent, recovered_index) = select_parent_and_index(child, 2, 16, 99);
            assert_eq!(recovered_parent, parent);
            assert_eq!(recovered_index, nth);
        }
    }
}

#[test]
fn exponential_selection_round_trips_over_random_parents() {
    let exp = ExpShape { shape: 0.15, cohort_size: 4, layers: 2 };
    let mut rng = rand::rng();
    for _ in 0..500 {
        let parent: u64 = rng.random_range(0..500_000);
        let count = count_select_exp_children(parent, 2, 16, exp, 11);
        for nth in 0..count {
            let child = select_exp_nth_child(parent, nth, 2, 16, exp, 11);
            if child == NONE {
                continue;
            }
            let (recovered_parent, recovered_index) =
                select_exp_parent_and_index(child, 2, 16, exp, 11);
            assert_eq!(recovered_parent, parent);
            assert_eq!(recovered_index, nth);
        }
    }
}

#[test]
fn polynomial_selection_round_trips_over_random_parents() {
    let poly = PolyShape { shape: 2, base: 6 };
    let mut rng = rand::rng();
    for _ in 0..500 {
        let parent: u64 = rng.random_range(0..500_000);
        let count = count_select_poly_children(parent, 2, 16, poly, 13);
        for nth in 0..count {
            let child = select_poly_nth_child(parent, nth, 2, 16, poly, 13);
            if child == NONE {
                continue;
            }
            let (recovered_parent, recovered_index) =
                select_poly_parent_and_index(child, 2, 16, poly, 13);
            assert_eq!(recovered_parent, parent);
            assert_eq!(recovered_index, nth);
        }
    }
}

#[test]
fn table_selection_round_trips_over_random_parents() {
    let table = SumTable::new(&[3, 5, 1, 2, 4]);
    let mut rng = rand::rng();
    for _ in 0..500 {
        let parent: u64 = rng.random_range(0..500_000);
        let count = count_select_table_children(parent, 8, 16, 4);
        for nth in 0..count {
            let child = select_table_nth_child(parent, nth, 8, 16, &table, 4, 4);
            if child == NONE {
                continue;
            }
            let (recovered_parent, recovered_index) =
                select_table_parent_and_index(child, 8, 16, &table, 4, 4);
            assert_eq!(recovered_parent, parent);
            assert_eq!(recovered_index, nth);
        }
    }
}
