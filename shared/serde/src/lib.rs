//! # Replica Serde
//! Bit-level serialization shared by the replica crates. Values are written
//! least-significant bit first into a growable buffer and read back with a
//! bounds-checked cursor.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_counter;
mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod serde;
mod varint;

pub use bit_counter::BitCounter;
pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use error::SerdeErr;
pub use serde::Serde;
pub use varint::VariableInteger;
