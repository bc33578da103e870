use crate::{
    world::{component::property_value::PropertyValue, entity::network_id::NetworkId},
    Tick, Transform,
};

/// Announces an entity to an endpoint that has not seen it yet
#[derive(Clone, Debug, PartialEq)]
pub struct EntityCreate {
    pub network_id: NetworkId,
    pub type_name: String,
    pub transform: Transform,
}

/// A batch of property values for one entity, as parallel lists
#[derive(Clone, Debug, PartialEq)]
pub struct EntityProperties {
    pub network_id: NetworkId,
    pub tick: Tick,
    pub is_client_message: bool,
    pub names: Vec<String>,
    pub values: Vec<PropertyValue>,
}

impl EntityProperties {
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Tells an endpoint the entity is gone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDestroy {
    pub network_id: NetworkId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ReplicationMessageKind {
    EntityCreate = 0,
    EntityProperties = 1,
    EntityDestroy = 2,
}

impl ReplicationMessageKind {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::EntityCreate),
            1 => Some(Self::EntityProperties),
            2 => Some(Self::EntityDestroy),
            _ => None,
        }
    }
}

/// Every message the replication layer puts on the wire
#[derive(Clone, Debug, PartialEq)]
pub enum ReplicationMessage {
    EntityCreate(EntityCreate),
    EntityProperties(EntityProperties),
    EntityDestroy(EntityDestroy),
}

impl ReplicationMessage {
    pub fn kind(&self) -> ReplicationMessageKind {
        match self {
            Self::EntityCreate(_) => ReplicationMessageKind::EntityCreate,
            Self::EntityProperties(_) => ReplicationMessageKind::EntityProperties,
            Self::EntityDestroy(_) => ReplicationMessageKind::EntityDestroy,
        }
    }

    pub fn network_id(&self) -> NetworkId {
        match self {
            Self::EntityCreate(message) => message.network_id,
            Self::EntityProperties(message) => message.network_id,
            Self::EntityDestroy(message) => message.network_id,
        }
    }
}

impl From<EntityCreate> for ReplicationMessage {
    fn from(message: EntityCreate) -> Self {
        Self::EntityCreate(message)
    }
}

impl From<EntityProperties> for ReplicationMessage {
    fn from(message: EntityProperties) -> Self {
        Self::EntityProperties(message)
    }
}

impl From<EntityDestroy> for ReplicationMessage {
    fn from(message: EntityDestroy) -> Self {
        Self::EntityDestroy(message)
    }
}
