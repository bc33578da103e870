use thiserror::Error;

/// The only failure a bit stream can produce: it ran out, or it held bits
/// that do not form a valid value of the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to deserialize value from bit stream")]
pub struct SerdeErr;
