//! The layered, reversible integer transforms everything else is built on:
//! [`unit`] scrambles single words, [`shuffle`] permutes `[0, n)`, [`cohort`]
//! partitions the id space into fixed or overlapping blocks, and
//! [`distribution`] layers non-uniform weighting on top of cohorts.

pub mod cohort;
pub mod distribution;
pub mod select;
pub mod shuffle;
pub mod unit;
