//! Stateless, on-demand computation of genealogical and demographic
//! relationships over an unbounded, never-materialized population.
//!
//! Every person is identified by a bare [`id::Id`]; there is no database, no
//! generation step, and no persisted state. [`family`] answers relationship
//! queries (who is this person's mother, partner, nth child) by composing
//! the reversible integer transforms in [`core`]: each layer is its own
//! bijection, and the family layer is simply a particular composition of
//! them parameterized by [`family::FamilyInfo`].

pub mod core;
pub mod family;
pub mod id;

pub use family::{
    birthdate, child, child_id_adjust, first_born_on, mother, mother_and_index, nth_partner,
    num_children, num_partners, FamilyInfo, FamilyParams, DEFAULT_FAMILY_INFO,
};
pub use id::{Day, Id, NONE};
