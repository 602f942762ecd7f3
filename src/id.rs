//! The identifier space shared by every layer.
//!
//! An [`Id`] is just a `u64`; the population is never materialized, so there
//! is no generator here, only the sentinel and the parity split the family
//! layer builds on.

/// A 64-bit person identifier. Every value in `1..=u64::MAX` denotes a
/// (conceptual, never-materialized) person; `0` is reserved as [`NONE`].
pub type Id = u64;

/// Calendar days since an implementation-defined epoch.
pub type Day = i64;

/// The out-of-band identifier meaning "no such entity."
pub const NONE: Id = 0;

/// A person whose Id is even bears children; see [`crate::family`].
pub fn is_child_bearer(person: Id) -> bool {
    person % 2 == 0
}

/// The odd, non-child-bearing member of `person`'s duo.
pub fn non_child_bearer(person: Id) -> Id {
    if is_child_bearer(person) {
        person + 1
    } else {
        person
    }
}

/// The even, child-bearing member of `person`'s duo.
pub fn child_bearer(person: Id) -> Id {
    if is_child_bearer(person) {
        person
    } else {
        person - 1
    }
}

/// The duo index shared by `person` and its odd/even counterpart.
pub fn separated(person: Id) -> Id {
    person / 2
}
