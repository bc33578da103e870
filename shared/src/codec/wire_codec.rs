//! Fixed-arity float encodings for the math types carried as property
//! payloads.
//!
//! | Type | Width | Order |
//! |------|-------|-------|
//! | `Vec2` | 2 | x, y |
//! | `Vec3` | 3 | x, y, z |
//! | `Vec4`, `Quat` | 4 | x, y, z, w |
//! | `Mat4` | 16 | row-major, M11..M44 |
//!
//! Decoding is the exact inverse. Nothing is normalized or validated: a
//! non-unit quaternion or a singular matrix comes back exactly as sent.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use replica_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::error::CodecError;

const MAX_WIDTH: usize = 16;

pub trait WireCodec: Sized {
    /// Number of 32-bit float components in the encoding
    const WIDTH: usize;

    /// Appends the components to `out`, so several values can be packed
    /// back-to-back in one buffer
    fn encode(&self, out: &mut Vec<f32>);

    /// Reads the value starting at `offset`
    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError>;

    /// Writes the encoded components into a bit stream
    fn write(&self, writer: &mut dyn BitWrite) {
        let mut components = Vec::with_capacity(Self::WIDTH);
        self.encode(&mut components);
        for component in &components {
            component.ser(writer);
        }
    }

    /// Reads `WIDTH` components from a bit stream and decodes them
    fn read(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut components = [0.0f32; MAX_WIDTH];
        for component in components.iter_mut().take(Self::WIDTH) {
            *component = f32::de(reader)?;
        }
        Self::decode(&components[..Self::WIDTH], 0).map_err(|_| SerdeErr)
    }
}

fn components<const N: usize>(buffer: &[f32], offset: usize) -> Result<[f32; N], CodecError> {
    let too_short = || CodecError::BufferTooShort {
        offset,
        width: N,
        len: buffer.len(),
    };
    let end = offset.checked_add(N).ok_or_else(too_short)?;
    let slice = buffer.get(offset..end).ok_or_else(too_short)?;
    let mut output = [0.0f32; N];
    output.copy_from_slice(slice);
    Ok(output)
}

impl WireCodec for Vec2 {
    const WIDTH: usize = 2;

    fn encode(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[self.x, self.y]);
    }

    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError> {
        components::<2>(buffer, offset).map(Vec2::from_array)
    }
}

impl WireCodec for Vec3 {
    const WIDTH: usize = 3;

    fn encode(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[self.x, self.y, self.z]);
    }

    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError> {
        components::<3>(buffer, offset).map(Vec3::from_array)
    }
}

impl WireCodec for Vec4 {
    const WIDTH: usize = 4;

    fn encode(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[self.x, self.y, self.z, self.w]);
    }

    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError> {
        components::<4>(buffer, offset).map(Vec4::from_array)
    }
}

impl WireCodec for Quat {
    const WIDTH: usize = 4;

    fn encode(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[self.x, self.y, self.z, self.w]);
    }

    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError> {
        components::<4>(buffer, offset).map(|[x, y, z, w]| Quat::from_xyzw(x, y, z, w))
    }
}

impl WireCodec for Mat4 {
    const WIDTH: usize = 16;

    // glam stores columns; the wire carries rows
    fn encode(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.transpose().to_cols_array());
    }

    fn decode(buffer: &[f32], offset: usize) -> Result<Self, CodecError> {
        components::<16>(buffer, offset).map(|rows| Mat4::from_cols_array(&rows).transpose())
    }
}
