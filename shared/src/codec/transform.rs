use glam::{Mat4, Quat, Vec3};
use replica_serde::{BitReader, BitWrite, Serde, SerdeErr};

use super::wire_codec::WireCodec;

/// Position, rotation and scale of an entity, sent with its creation
/// announcement and usable as a property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Network form of a [`Transform`]. The layout is owned by the
/// implementation, so hosts can swap in quantized or compressed variants.
pub trait TransformSerializer {
    fn write(&self, transform: &Transform, writer: &mut dyn BitWrite);
    fn read(&self, reader: &mut BitReader) -> Result<Transform, SerdeErr>;
}

/// Full-precision layout: translation (3), rotation (4), then a flag and,
/// only when scale differs from one, the scale (3).
#[derive(Clone, Copy, Debug, Default)]
pub struct PackedTransformSerializer;

impl TransformSerializer for PackedTransformSerializer {
    fn write(&self, transform: &Transform, writer: &mut dyn BitWrite) {
        transform.translation.write(writer);
        transform.rotation.write(writer);
        let has_scale = transform.scale != Vec3::ONE;
        has_scale.ser(writer);
        if has_scale {
            transform.scale.write(writer);
        }
    }

    fn read(&self, reader: &mut BitReader) -> Result<Transform, SerdeErr> {
        let translation = Vec3::read(reader)?;
        let rotation = Quat::read(reader)?;
        let scale = if bool::de(reader)? {
            Vec3::read(reader)?
        } else {
            Vec3::ONE
        };
        Ok(Transform {
            translation,
            rotation,
            scale,
        })
    }
}
