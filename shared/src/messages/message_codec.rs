use replica_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use crate::{
    codec::transform::{PackedTransformSerializer, TransformSerializer},
    world::{
        component::property_value::{PropertyKind, PropertyValue},
        entity::network_id::NetworkId,
    },
    Tick,
};

use super::replication_message::{
    EntityCreate, EntityDestroy, EntityProperties, ReplicationMessage, ReplicationMessageKind,
};

/// Turns replication messages into payload bytes and back
pub trait MessageCodec {
    fn serialize(&self, message: &ReplicationMessage) -> Vec<u8>;
    fn deserialize(&self, payload: &[u8]) -> Result<ReplicationMessage, SerdeErr>;
}

/// Bit-packed codec: a kind tag, the entity id, then the body. Property
/// batches carry their names, then their kind tags, then the values.
#[derive(Clone, Debug, Default)]
pub struct BitMessageCodec<S: TransformSerializer = PackedTransformSerializer> {
    transforms: S,
}

impl BitMessageCodec {
    /// Codec using the full-precision transform layout
    pub fn packed() -> Self {
        Self::new(PackedTransformSerializer)
    }
}

impl<S: TransformSerializer> BitMessageCodec<S> {
    pub fn new(transforms: S) -> Self {
        Self { transforms }
    }

    pub fn write(&self, message: &ReplicationMessage, writer: &mut dyn BitWrite) {
        message.kind().to_u8().ser(writer);
        message.network_id().ser(writer);
        match message {
            ReplicationMessage::EntityCreate(create) => {
                create.type_name.ser(writer);
                self.transforms.write(&create.transform, writer);
            }
            ReplicationMessage::EntityProperties(properties) => {
                properties.tick.ser(writer);
                properties.is_client_message.ser(writer);
                properties.names.ser(writer);
                let kinds: Vec<PropertyKind> =
                    properties.values.iter().map(PropertyValue::kind).collect();
                kinds.ser(writer);
                for value in &properties.values {
                    value.write(writer, &self.transforms);
                }
            }
            ReplicationMessage::EntityDestroy(_) => {}
        }
    }

    pub fn read(&self, reader: &mut BitReader) -> Result<ReplicationMessage, SerdeErr> {
        let kind = ReplicationMessageKind::from_u8(u8::de(reader)?).ok_or(SerdeErr)?;
        let network_id = NetworkId::de(reader)?;
        let message = match kind {
            ReplicationMessageKind::EntityCreate => {
                let type_name = String::de(reader)?;
                let transform = self.transforms.read(reader)?;
                EntityCreate {
                    network_id,
                    type_name,
                    transform,
                }
                .into()
            }
            ReplicationMessageKind::EntityProperties => {
                let tick = Tick::de(reader)?;
                let is_client_message = bool::de(reader)?;
                let names = Vec::<String>::de(reader)?;
                let kinds = Vec::<PropertyKind>::de(reader)?;
                if kinds.len() != names.len() {
                    return Err(SerdeErr);
                }
                let mut values = Vec::with_capacity(kinds.len());
                for kind in kinds {
                    values.push(PropertyValue::read(kind, reader, &self.transforms)?);
                }
                EntityProperties {
                    network_id,
                    tick,
                    is_client_message,
                    names,
                    values,
                }
                .into()
            }
            ReplicationMessageKind::EntityDestroy => EntityDestroy { network_id }.into(),
        };
        Ok(message)
    }
}

impl<S: TransformSerializer> MessageCodec for BitMessageCodec<S> {
    fn serialize(&self, message: &ReplicationMessage) -> Vec<u8> {
        let mut writer = BitWriter::new();
        self.write(message, &mut writer);
        writer.to_bytes()
    }

    fn deserialize(&self, payload: &[u8]) -> Result<ReplicationMessage, SerdeErr> {
        let mut reader = BitReader::new(payload);
        self.read(&mut reader)
    }
}
