//! # Replica Shared
//! Entity-state replication shared by the server and client sides: the
//! property registry, authority model, delta builder, wire codec and the
//! per-entity synchronizer that ties them to a transport.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use replica_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, VariableInteger};

mod codec;
mod messages;
mod transport;
mod types;
mod world;
mod wrapping_number;

pub use codec::{
    error::CodecError,
    transform::{PackedTransformSerializer, Transform, TransformSerializer},
    wire_codec::WireCodec,
};
pub use messages::{
    message_codec::{BitMessageCodec, MessageCodec},
    replication_message::{
        EntityCreate, EntityDestroy, EntityProperties, ReplicationMessage, ReplicationMessageKind,
    },
};
pub use transport::{Transport, TransportSet};
pub use types::{HostType, Tick};
pub use world::{
    component::{
        error::PropertyError,
        property_value::{PropertyKind, PropertyValue, SyncValue},
        registry::{PropertyRegistry, SyncedProperty},
        setter::Setter,
        synchronized::{AsAnyMut, Declarer, SyncedEntity, SynchronizedObject},
    },
    delegation::authority::{Authoring, AuthorityConfig, ClientAuthorityMode},
    entity::{
        id_allocator::{NetworkIdAllocator, SequentialNetworkIdAllocator},
        network_id::NetworkId,
    },
    host::{
        delta_builder::{DeltaBuilder, PropertyDelta},
        visibility::VisibleEndpoints,
    },
    remote::ingest::apply_properties,
    sync::{config::SyncConfig, engine::EntitySynchronizer, error::SyncError},
};
pub use wrapping_number::{
    interval_elapsed, sequence_greater_than, sequence_less_than, wrapping_diff,
};
