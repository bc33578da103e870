use std::any::Any;

use crate::codec::transform::Transform;

use super::{property_value::SyncValue, registry::PropertyRegistry};

/// Gives the engine a `&mut dyn Any` view of a synchronized object so a
/// type-erased setter can reach it. Implemented for every `'static` type.
pub trait AsAnyMut {
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAnyMut for T {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Capability of an object whose state is replicated. Called once per
/// declaration pass; every property it wants kept in sync must be declared
/// again each time.
pub trait SynchronizedObject: AsAnyMut {
    fn declare_synchronized_properties(&self, declarer: &mut Declarer);
}

/// The replicated entity as the engine sees it
pub trait SyncedEntity {
    /// Resolvable type name sent in the creation announcement
    fn type_name(&self) -> &str;

    /// Transform sent in the creation announcement
    fn transform(&self) -> Transform;

    /// Hands every synchronized object to `visitor` together with its
    /// context name. Context names must be stable and unique per entity:
    /// they prefix every property key.
    fn visit_synchronized_objects(
        &mut self,
        visitor: &mut dyn FnMut(&str, &mut dyn SynchronizedObject),
    );
}

/// Handle passed to [`SynchronizedObject::declare_synchronized_properties`].
/// Only the engine can open one, so declarations always land under the
/// context of the object being visited.
pub struct Declarer<'r> {
    registry: &'r mut PropertyRegistry,
    context: &'r str,
}

impl<'r> Declarer<'r> {
    pub(crate) fn new(registry: &'r mut PropertyRegistry, context: &'r str) -> Self {
        Self { registry, context }
    }

    pub fn context(&self) -> &str {
        self.context
    }

    /// Declares `name` with its current value. `frame_interval` is the
    /// minimum number of ticks between two transmissions; `setter` writes a
    /// received value back into the object.
    pub fn synchronize<O: SynchronizedObject + 'static, T: SyncValue>(
        &mut self,
        name: &str,
        frame_interval: u16,
        value: T,
        setter: fn(&mut O, T),
    ) {
        self.registry
            .declare(self.context, name, frame_interval, value, setter);
    }
}
