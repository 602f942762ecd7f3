//! Mother, partner, and child relationships layered on top of [`crate::core`]'s
//! generic transforms: the system's single externally-meaningful surface.
//!
//! A person is just an [`crate::id::Id`]; parity picks out the child-bearing
//! half of a reproductive "duo" ([`crate::id::is_child_bearer`]). [`info`]
//! holds the one configuration object every function here takes by
//! reference; [`birth`] derives birthdates and the mother/direct-child
//! relation; [`partner`] layers partner assignment and the full
//! partner-aware child relation on top.

pub mod birth;
pub mod info;
pub mod partner;

pub use birth::{birthdate, child_id_adjust, first_born_on, mother, mother_and_index};
pub use info::{FamilyInfo, FamilyParams, DEFAULT_FAMILY_INFO};
pub use partner::{child, nth_partner, num_children, num_partners};
