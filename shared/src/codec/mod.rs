pub mod error;
pub mod transform;
pub mod wire_codec;
