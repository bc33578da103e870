use std::collections::HashMap;

use log::{debug, warn};

use crate::Tick;

use super::{
    property_value::{PropertyKind, PropertyValue, SyncValue},
    setter::Setter,
    synchronized::{Declarer, SyncedEntity, SynchronizedObject},
};

/// Sync state of one declared property, keyed `"<context>.<name>"`
pub struct SyncedProperty {
    name: String,
    context_len: usize,
    frame_interval: u16,
    last_value: PropertyValue,
    current_value: PropertyValue,
    last_frame_synced: Tick,
    has_performed_initial_sync: bool,
    has_received_initial_sync: bool,
    is_active: bool,
    setter: Setter,
}

impl SyncedProperty {
    fn new(name: String, context_len: usize, value: PropertyValue) -> Self {
        Self {
            name,
            context_len,
            frame_interval: 0,
            last_value: value,
            current_value: value,
            last_frame_synced: 0,
            has_performed_initial_sync: false,
            has_received_initial_sync: false,
            is_active: false,
            setter: Setter::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &str {
        &self.name[..self.context_len]
    }

    pub fn property_name(&self) -> &str {
        &self.name[self.context_len + 1..]
    }

    pub fn kind(&self) -> PropertyKind {
        self.current_value.kind()
    }

    pub fn frame_interval(&self) -> u16 {
        self.frame_interval
    }

    /// Value as of the previous declaration pass, a transmission, or the
    /// last received value, whichever happened most recently
    pub fn last_value(&self) -> &PropertyValue {
        &self.last_value
    }

    /// Value as of the latest declaration pass
    pub fn current_value(&self) -> &PropertyValue {
        &self.current_value
    }

    pub fn last_frame_synced(&self) -> Tick {
        self.last_frame_synced
    }

    pub fn has_performed_initial_sync(&self) -> bool {
        self.has_performed_initial_sync
    }

    pub fn has_received_initial_sync(&self) -> bool {
        self.has_received_initial_sync
    }

    /// Declared during the most recent pass
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_dirty(&self) -> bool {
        self.current_value != self.last_value
    }

    pub(crate) fn mark_synced(&mut self, tick: Tick) {
        self.has_performed_initial_sync = true;
        self.last_frame_synced = tick;
        self.last_value = self.current_value;
    }

    fn receive(&mut self, value: PropertyValue) {
        self.current_value = value;
        self.last_value = value;
        self.has_received_initial_sync = true;
    }
}

/// Per-entity store of synchronized properties. Entries are created on
/// first declaration and kept across passes, in declaration order, so
/// cadence and initial-sync state survive from tick to tick.
#[derive(Default)]
pub struct PropertyRegistry {
    properties: Vec<SyncedProperty>,
    index: HashMap<String, usize>,
    key_scratch: String,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SyncedProperty> {
        self.index.get(name).map(|index| &self.properties[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncedProperty> {
        self.properties.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut SyncedProperty> {
        self.properties.iter_mut()
    }

    /// Deactivates every entry, then lets each synchronized object of
    /// `entity` declare its properties under its own context.
    pub(crate) fn run_declaration_pass(&mut self, entity: &mut dyn SyncedEntity) {
        for property in self.properties.iter_mut() {
            property.is_active = false;
        }
        entity.visit_synchronized_objects(
            &mut |context: &str, object: &mut dyn SynchronizedObject| {
                let mut declarer = Declarer::new(&mut *self, context);
                object.declare_synchronized_properties(&mut declarer);
            },
        );
    }

    pub(crate) fn declare<O: 'static, T: SyncValue>(
        &mut self,
        context: &str,
        name: &str,
        frame_interval: u16,
        value: T,
        setter: fn(&mut O, T),
    ) {
        self.key_scratch.clear();
        self.key_scratch.push_str(context);
        self.key_scratch.push('.');
        self.key_scratch.push_str(name);

        let value = value.into_value();
        let index = match self.index.get(self.key_scratch.as_str()) {
            Some(index) => *index,
            None => {
                let index = self.properties.len();
                debug!("PropertyRegistry: registering {}", self.key_scratch);
                self.properties.push(SyncedProperty::new(
                    self.key_scratch.clone(),
                    context.len(),
                    value,
                ));
                self.index.insert(self.key_scratch.clone(), index);
                index
            }
        };

        let property = &mut self.properties[index];
        property.last_value = property.current_value;
        property.current_value = value;
        property.frame_interval = frame_interval;
        property.is_active = true;
        property.setter.bind(setter);
    }

    /// Applies a received value to `object` if `name` is registered under
    /// `context`. Returns whether the setter ran.
    pub(crate) fn apply_received(
        &mut self,
        context: &str,
        object: &mut dyn SynchronizedObject,
        name: &str,
        value: &PropertyValue,
    ) -> bool {
        let Some(index) = self.index.get(name) else {
            return false;
        };
        let property = &mut self.properties[*index];
        if property.context() != context {
            return false;
        }
        match property.setter.apply(object.as_any_mut(), value) {
            Ok(()) => {
                property.receive(*value);
                true
            }
            Err(error) => {
                warn!("PropertyRegistry: dropping received value for {}: {}", name, error);
                false
            }
        }
    }

    /// Removes entries that were not declared in the latest pass. Returns
    /// how many were removed.
    pub fn prune_inactive(&mut self) -> usize {
        let before = self.properties.len();
        self.properties.retain(|property| property.is_active);
        let removed = before - self.properties.len();
        if removed > 0 {
            self.index.clear();
            for (index, property) in self.properties.iter().enumerate() {
                self.index.insert(property.name.clone(), index);
            }
        }
        removed
    }

    /// Forces every entry back through its first sync, making the next
    /// delta a complete baseline.
    pub(crate) fn reset_initial_sync(&mut self) {
        for property in self.properties.iter_mut() {
            property.has_performed_initial_sync = false;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.properties.clear();
        self.index.clear();
    }
}
