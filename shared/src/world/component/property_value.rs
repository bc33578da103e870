use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use replica_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::codec::{
    transform::{Transform, TransformSerializer},
    wire_codec::WireCodec,
};

/// Wire tag carried next to every property name, selecting the codec the
/// receiver uses for the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PropertyKind {
    Bool = 0,
    Int = 1,
    Float = 2,
    Vec2 = 3,
    Vec3 = 4,
    Vec4 = 5,
    Quat = 6,
    Mat4 = 7,
    Transform = 8,
}

impl PropertyKind {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Bool,
            1 => Self::Int,
            2 => Self::Float,
            3 => Self::Vec2,
            4 => Self::Vec3,
            5 => Self::Vec4,
            6 => Self::Quat,
            7 => Self::Mat4,
            8 => Self::Transform,
            _ => return None,
        })
    }
}

impl Serde for PropertyKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.to_u8().ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::from_u8(u8::de(reader)?).ok_or(SerdeErr)
    }
}

/// Snapshot of a synchronized property. Equality treats NaN components as
/// equal to each other so a NaN value is not reported as changed every pass.
#[derive(Clone, Copy, Debug)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Quat(Quat),
    Mat4(Mat4),
    Transform(Transform),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::Int(_) => PropertyKind::Int,
            Self::Float(_) => PropertyKind::Float,
            Self::Vec2(_) => PropertyKind::Vec2,
            Self::Vec3(_) => PropertyKind::Vec3,
            Self::Vec4(_) => PropertyKind::Vec4,
            Self::Quat(_) => PropertyKind::Quat,
            Self::Mat4(_) => PropertyKind::Mat4,
            Self::Transform(_) => PropertyKind::Transform,
        }
    }

    /// Writes the payload only; the kind travels separately
    pub fn write(&self, writer: &mut dyn BitWrite, transforms: &dyn TransformSerializer) {
        match self {
            Self::Bool(value) => value.ser(writer),
            Self::Int(value) => value.ser(writer),
            Self::Float(value) => value.ser(writer),
            Self::Vec2(value) => value.write(writer),
            Self::Vec3(value) => value.write(writer),
            Self::Vec4(value) => value.write(writer),
            Self::Quat(value) => value.write(writer),
            Self::Mat4(value) => value.write(writer),
            Self::Transform(value) => transforms.write(value, writer),
        }
    }

    pub fn read(
        kind: PropertyKind,
        reader: &mut BitReader,
        transforms: &dyn TransformSerializer,
    ) -> Result<Self, SerdeErr> {
        Ok(match kind {
            PropertyKind::Bool => Self::Bool(bool::de(reader)?),
            PropertyKind::Int => Self::Int(i32::de(reader)?),
            PropertyKind::Float => Self::Float(f32::de(reader)?),
            PropertyKind::Vec2 => Self::Vec2(Vec2::read(reader)?),
            PropertyKind::Vec3 => Self::Vec3(Vec3::read(reader)?),
            PropertyKind::Vec4 => Self::Vec4(Vec4::read(reader)?),
            PropertyKind::Quat => Self::Quat(Quat::read(reader)?),
            PropertyKind::Mat4 => Self::Mat4(Mat4::read(reader)?),
            PropertyKind::Transform => Self::Transform(transforms.read(reader)?),
        })
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => same_float(*a, *b),
            (Self::Vec2(a), Self::Vec2(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Vec3(a), Self::Vec3(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Vec4(a), Self::Vec4(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Quat(a), Self::Quat(b)) => same_floats(&a.to_array(), &b.to_array()),
            (Self::Mat4(a), Self::Mat4(b)) => {
                same_floats(&a.to_cols_array(), &b.to_cols_array())
            }
            (Self::Transform(a), Self::Transform(b)) => {
                same_floats(&a.translation.to_array(), &b.translation.to_array())
                    && same_floats(&a.rotation.to_array(), &b.rotation.to_array())
                    && same_floats(&a.scale.to_array(), &b.scale.to_array())
            }
            _ => false,
        }
    }
}

fn same_float(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn same_floats(a: &[f32], b: &[f32]) -> bool {
    a.iter().zip(b).all(|(a, b)| same_float(*a, *b))
}

/// Rust types that can be declared as synchronized properties
pub trait SyncValue: Copy + 'static {
    const KIND: PropertyKind;

    fn into_value(self) -> PropertyValue;
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! impl_sync_value {
    ($type:ty, $variant:ident) => {
        impl SyncValue for $type {
            const KIND: PropertyKind = PropertyKind::$variant;

            fn into_value(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }

            fn from_value(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    };
}

impl_sync_value!(bool, Bool);
impl_sync_value!(i32, Int);
impl_sync_value!(f32, Float);
impl_sync_value!(Vec2, Vec2);
impl_sync_value!(Vec3, Vec3);
impl_sync_value!(Vec4, Vec4);
impl_sync_value!(Quat, Quat);
impl_sync_value!(Mat4, Mat4);
impl_sync_value!(Transform, Transform);
