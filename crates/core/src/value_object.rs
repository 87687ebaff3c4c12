//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values.

/// Marker trait for value objects.
///
/// - **Value Object**: `Salary("200000.50")` equals any other salary with the same digits and scale.
/// - **Entity**: two employees with the same id are the same employee.
///
/// Value objects are immutable. To "change" one, parse or construct a new
/// value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct EffectiveDate(chrono::NaiveDate);
///
/// impl ValueObject for EffectiveDate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
