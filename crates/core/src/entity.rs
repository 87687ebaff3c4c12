//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Document stores key records by this identifier, so two records with the
/// same id are the same employee (or the same compensation slot) no matter
/// how their attributes differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
