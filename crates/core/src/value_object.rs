//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In this
/// crate `Money` and `Participant` are value objects: two participants with the
/// same (trimmed) name are the same participant.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
