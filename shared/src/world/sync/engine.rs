use std::net::SocketAddr;

use log::{debug, info, warn};

use crate::{
    messages::{
        message_codec::{BitMessageCodec, MessageCodec},
        replication_message::{EntityCreate, EntityDestroy, EntityProperties, ReplicationMessage},
    },
    transport::Transport,
    world::{
        component::{registry::PropertyRegistry, synchronized::SyncedEntity},
        delegation::authority::{AuthorityConfig, Authoring, ClientAuthorityMode},
        entity::{id_allocator::NetworkIdAllocator, network_id::NetworkId},
        host::{
            delta_builder::{DeltaBuilder, PropertyDelta},
            visibility::VisibleEndpoints,
        },
        remote::ingest::apply_properties,
    },
    HostType, Tick,
};

use super::{config::SyncConfig, error::SyncError};

/// Replication state of one entity. Owns the entity's property registry and
/// visibility set; driven once per tick by the host's scheduler through the
/// update and receive entry points.
pub struct EntitySynchronizer {
    config: SyncConfig,
    network_id: Option<NetworkId>,
    registry: PropertyRegistry,
    visible: VisibleEndpoints,
    codec: Box<dyn MessageCodec>,
}

impl EntitySynchronizer {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_codec(config, Box::new(BitMessageCodec::packed()))
    }

    pub fn with_codec(config: SyncConfig, codec: Box<dyn MessageCodec>) -> Self {
        Self {
            config,
            network_id: None,
            registry: PropertyRegistry::new(),
            visible: VisibleEndpoints::new(),
            codec,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn authority(&self) -> &AuthorityConfig {
        &self.config.authority
    }

    /// Ownership and mode may change at runtime, e.g. when a client is
    /// granted authority
    pub fn authority_mut(&mut self) -> &mut AuthorityConfig {
        &mut self.config.authority
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    pub fn visible_endpoints(&self) -> &VisibleEndpoints {
        &self.visible
    }

    // Identity

    pub fn network_id(&self) -> Option<NetworkId> {
        self.network_id
    }

    /// Server side: takes a fresh id from `allocator` unless one is
    /// already assigned
    pub fn allocate_network_id(&mut self, allocator: &mut dyn NetworkIdAllocator) -> NetworkId {
        if let Some(network_id) = self.network_id {
            return network_id;
        }
        let network_id = allocator.allocate();
        info!("EntitySynchronizer: allocated network id {}", network_id);
        self.network_id = Some(network_id);
        network_id
    }

    pub fn receive_network_id_from_server(&mut self, network_id: NetworkId) {
        if self.network_id != Some(network_id) {
            info!("EntitySynchronizer: received network id {} from server", network_id);
        }
        self.network_id = Some(network_id);
    }

    /// Client-predicted ids are not supported; the call is accepted and
    /// ignored.
    pub fn receive_predicted_id_from_client(&mut self, predicted_id: u32) {
        debug!(
            "EntitySynchronizer: ignoring predicted id {} from client",
            predicted_id
        );
    }

    // Outgoing

    /// Panics on any [`SyncError`]; see [`Self::try_server_update`]
    pub fn server_update<E: SyncedEntity>(
        &mut self,
        entity: &mut E,
        tick: Tick,
        transport: &mut dyn Transport,
    ) {
        if let Err(error) = self.try_server_update(entity, tick, transport) {
            panic!("{}", error);
        }
    }

    /// Announces the entity to newly connected endpoints, then sends the
    /// properties due on `tick` to every endpoint that already knows it.
    /// Does nothing until a network id is assigned.
    pub fn try_server_update<E: SyncedEntity>(
        &mut self,
        entity: &mut E,
        tick: Tick,
        transport: &mut dyn Transport,
    ) -> Result<(), SyncError> {
        if self.network_id.is_none() || !self.may_author(HostType::Server)? {
            return Ok(());
        }

        self.registry.run_declaration_pass(entity);

        let endpoints = transport.endpoints();
        let joined = self.discover(entity, &endpoints, transport)?;
        if joined > 0 && self.config.resend_baseline_on_join {
            self.registry.reset_initial_sync();
        }

        let recipients: Vec<SocketAddr> = endpoints
            .into_iter()
            .filter(|endpoint| {
                self.visible.contains(endpoint)
                    && self.config.authority.may_send_to(HostType::Server, endpoint)
            })
            .collect();

        self.send_delta(HostType::Server, tick, &recipients, transport)?;
        self.prune_if_configured();
        Ok(())
    }

    /// Panics on any [`SyncError`]; see [`Self::try_client_update`]
    pub fn client_update<E: SyncedEntity>(
        &mut self,
        entity: &mut E,
        tick: Tick,
        transport: &mut dyn Transport,
    ) {
        if let Err(error) = self.try_client_update(entity, tick, transport) {
            panic!("{}", error);
        }
    }

    /// Sends the client-authored properties due on `tick`. Only properties
    /// the client has already received a value for are ever sent.
    pub fn try_client_update<E: SyncedEntity>(
        &mut self,
        entity: &mut E,
        tick: Tick,
        transport: &mut dyn Transport,
    ) -> Result<(), SyncError> {
        if self.network_id.is_none() || !self.may_author(HostType::Client)? {
            return Ok(());
        }

        self.registry.run_declaration_pass(entity);

        let recipients: Vec<SocketAddr> = transport
            .endpoints()
            .into_iter()
            .filter(|endpoint| self.config.authority.may_send_to(HostType::Client, endpoint))
            .collect();

        self.send_delta(HostType::Client, tick, &recipients, transport)?;
        self.prune_if_configured();
        Ok(())
    }

    pub fn entity_create_message<E: SyncedEntity>(
        &self,
        entity: &E,
    ) -> Result<EntityCreate, SyncError> {
        Ok(EntityCreate {
            network_id: self.network_id.ok_or(SyncError::MissingNetworkId)?,
            type_name: entity.type_name().to_string(),
            transform: entity.transform(),
        })
    }

    fn may_author(&self, host: HostType) -> Result<bool, SyncError> {
        match self.config.authority.authoring(host) {
            Authoring::Permitted => Ok(true),
            Authoring::Withheld => Ok(false),
            Authoring::Unsupported => Err(SyncError::UnsupportedAuthorityMode {
                mode: self.config.authority.mode,
            }),
        }
    }

    /// Sends the creation message to every endpoint that passes the filter
    /// and has not seen the entity. Returns how many endpoints joined.
    fn discover<E: SyncedEntity>(
        &mut self,
        entity: &E,
        endpoints: &[SocketAddr],
        transport: &mut dyn Transport,
    ) -> Result<usize, SyncError> {
        let network_id = self.network_id.ok_or(SyncError::MissingNetworkId)?;
        let mut joined = 0;
        let mut payload: Option<Vec<u8>> = None;
        for endpoint in endpoints {
            if self.visible.contains(endpoint)
                || !self.config.authority.may_send_to(HostType::Server, endpoint)
            {
                continue;
            }
            if payload.is_none() {
                let message = ReplicationMessage::from(self.entity_create_message(entity)?);
                payload = Some(self.codec.serialize(&message));
            }
            if let Some(bytes) = &payload {
                transport.send(endpoint, bytes, true);
            }
            self.visible.insert(*endpoint);
            info!(
                "EntitySynchronizer: entity {} now visible to {}",
                network_id, endpoint
            );
            joined += 1;
        }
        Ok(joined)
    }

    fn send_delta(
        &mut self,
        host: HostType,
        tick: Tick,
        recipients: &[SocketAddr],
        transport: &mut dyn Transport,
    ) -> Result<(), SyncError> {
        if recipients.is_empty() {
            return Ok(());
        }
        let builder = DeltaBuilder::new(host);
        let Some(delta) = builder.collect(&mut self.registry, tick, &self.config.authority) else {
            return Ok(());
        };

        let reliable = delta.reliable;
        let count = delta.len();
        let message = self.properties_message(host, tick, delta)?;
        let payload = self.codec.serialize(&message);
        for endpoint in recipients {
            transport.send(endpoint, &payload, reliable);
        }
        debug!(
            "EntitySynchronizer: tick {} sent {} properties to {} endpoints (reliable: {})",
            tick,
            count,
            recipients.len(),
            reliable
        );
        Ok(())
    }

    fn properties_message(
        &self,
        host: HostType,
        tick: Tick,
        delta: PropertyDelta,
    ) -> Result<ReplicationMessage, SyncError> {
        Ok(EntityProperties {
            network_id: self.network_id.ok_or(SyncError::MissingNetworkId)?,
            tick,
            is_client_message: host == HostType::Client,
            names: delta.names,
            values: delta.values,
        }
        .into())
    }

    fn prune_if_configured(&mut self) {
        if !self.config.prune_stale_properties {
            return;
        }
        let removed = self.registry.prune_inactive();
        if removed > 0 {
            debug!("EntitySynchronizer: pruned {} stale properties", removed);
        }
    }

    // Incoming

    /// Applies a property batch from `sender` if the entity's authority
    /// accepts it. Returns whether the message was handled.
    pub fn server_receive<E: SyncedEntity>(
        &mut self,
        entity: &mut E,
        sender: &SocketAddr,
        payload: &[u8],
    ) -> bool {
        let Some(message) = self.decode_properties(payload) else {
            return false;
        };
        let authority = &self.config.authority;
        if !authority.may_accept_from(sender) {
            if authority.mode == ClientAuthorityMode::ReplayInputs {
                debug!("EntitySynchronizer: discarding message under ReplayInputs");
            } else {
                warn!(
                    "EntitySynchronizer: {} may not author entity {}, message dropped",
                    sender, message.network_id
                );
            }
            return false;
        }
        self.apply(entity, &message);
        true
    }

    /// Applies a property batch from the server. Returns whether the
    /// message was handled.
    pub fn client_receive<E: SyncedEntity>(&mut self, entity: &mut E, payload: &[u8]) -> bool {
        let Some(message) = self.decode_properties(payload) else {
            return false;
        };
        self.apply(entity, &message);
        true
    }

    /// Decodes `payload` and keeps it only if it is a property batch for
    /// this entity
    fn decode_properties(&self, payload: &[u8]) -> Option<EntityProperties> {
        let network_id = self.network_id?;
        let message = match self.codec.deserialize(payload) {
            Ok(message) => message,
            Err(_) => {
                warn!("EntitySynchronizer: dropping undecodable payload");
                return None;
            }
        };
        match message {
            ReplicationMessage::EntityProperties(properties) => {
                if properties.network_id == network_id {
                    Some(properties)
                } else {
                    warn!(
                        "EntitySynchronizer: message for entity {} delivered to {}",
                        properties.network_id, network_id
                    );
                    None
                }
            }
            ReplicationMessage::EntityCreate(_) | ReplicationMessage::EntityDestroy(_) => None,
        }
    }

    fn apply<E: SyncedEntity>(&mut self, entity: &mut E, message: &EntityProperties) {
        let applied = apply_properties(&mut self.registry, entity, message);
        debug!(
            "EntitySynchronizer: applied {} of {} received properties (tick {})",
            applied,
            message.names.len(),
            message.tick
        );
    }

    // Teardown

    /// Forgets `endpoint`, so it gets a fresh creation message if it
    /// connects again
    pub fn on_endpoint_disconnected(&mut self, endpoint: &SocketAddr) {
        if self.visible.remove(endpoint) {
            info!("EntitySynchronizer: {} disconnected", endpoint);
        }
    }

    /// Tells every endpoint that knows the entity that it is gone, then
    /// drops all replication state including the network id.
    pub fn despawn(&mut self, transport: &mut dyn Transport) {
        if let Some(network_id) = self.network_id.take() {
            let message = ReplicationMessage::from(EntityDestroy { network_id });
            let payload = self.codec.serialize(&message);
            for endpoint in self.visible.iter() {
                transport.send(endpoint, &payload, true);
            }
            info!(
                "EntitySynchronizer: despawned entity {} ({} endpoints notified)",
                network_id,
                self.visible.len()
            );
        }
        self.visible.clear();
        self.registry.clear();
    }
}
