use thiserror::Error;

use super::property_value::PropertyKind;

/// Errors that can occur while applying a received value through a
/// declared setter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The object handed to the setter is not the type it was declared on
    #[error("Setter was declared on `{expected}` but was applied to another object type")]
    TargetTypeMismatch { expected: &'static str },

    /// The received value's kind differs from the declared kind
    #[error("Property expects a {expected:?} value, received {actual:?}")]
    ValueKindMismatch {
        expected: PropertyKind,
        actual: PropertyKind,
    },

    /// The entry exists but no declaration has bound a setter yet
    #[error("Property has no bound setter")]
    SetterNotBound,
}
