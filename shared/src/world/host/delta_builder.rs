use crate::{
    world::{
        component::{
            property_value::PropertyValue,
            registry::{PropertyRegistry, SyncedProperty},
        },
        delegation::authority::AuthorityConfig,
    },
    wrapping_number::interval_elapsed,
    HostType, Tick,
};

/// Properties selected for transmission on one tick, in registry order
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDelta {
    pub names: Vec<String>,
    pub values: Vec<PropertyValue>,
    /// Set when any property in the batch is on its first sync
    pub reliable: bool,
}

impl PropertyDelta {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Chooses which registry entries go out on a tick
pub struct DeltaBuilder {
    host: HostType,
}

impl DeltaBuilder {
    pub fn new(host: HostType) -> Self {
        Self { host }
    }

    pub fn host(&self) -> HostType {
        self.host
    }

    pub fn needs_sync(
        &self,
        property: &SyncedProperty,
        tick: Tick,
        authority: &AuthorityConfig,
    ) -> bool {
        if !property.is_active() {
            return false;
        }
        if self.host == HostType::Client && !property.has_received_initial_sync() {
            return false;
        }
        if !property.has_performed_initial_sync() {
            return true;
        }
        authority.side_may_originate(self.host)
            && property.is_dirty()
            && interval_elapsed(property.last_frame_synced(), property.frame_interval(), tick)
    }

    /// Collects every property due on `tick` and marks it synced. Returns
    /// `None`, leaving the registry untouched, when nothing is due.
    pub fn collect(
        &self,
        registry: &mut PropertyRegistry,
        tick: Tick,
        authority: &AuthorityConfig,
    ) -> Option<PropertyDelta> {
        let mut delta = PropertyDelta {
            names: Vec::new(),
            values: Vec::new(),
            reliable: false,
        };

        for property in registry.iter_mut() {
            if !self.needs_sync(property, tick, authority) {
                continue;
            }
            if !property.has_performed_initial_sync() {
                delta.reliable = true;
            }
            delta.names.push(property.name().to_string());
            delta.values.push(*property.current_value());
            property.mark_synced(tick);
        }

        if delta.is_empty() {
            None
        } else {
            Some(delta)
        }
    }
}
