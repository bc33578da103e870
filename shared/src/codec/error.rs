use thiserror::Error;

/// Errors that can occur while decoding fixed-width float payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The buffer ends before the value's last component
    #[error("Cannot decode {width} components at offset {offset} from a buffer of {len} floats")]
    BufferTooShort {
        offset: usize,
        width: usize,
        len: usize,
    },
}
