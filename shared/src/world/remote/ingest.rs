use crate::{
    messages::replication_message::EntityProperties,
    world::component::{
        registry::PropertyRegistry,
        synchronized::{SyncedEntity, SynchronizedObject},
    },
};

/// Applies a received property batch to `entity`. Runs a fresh declaration
/// pass so every setter is bound to the live object, then hands each carried
/// value to the object whose context prefixes its name. Returns how many
/// values were applied.
pub fn apply_properties(
    registry: &mut PropertyRegistry,
    entity: &mut dyn SyncedEntity,
    message: &EntityProperties,
) -> usize {
    registry.run_declaration_pass(entity);

    let mut applied = 0;
    entity.visit_synchronized_objects(
        &mut |context: &str, object: &mut dyn SynchronizedObject| {
            for (name, value) in message.properties() {
                if !has_context(name, context) {
                    continue;
                }
                if registry.apply_received(context, &mut *object, name, value) {
                    applied += 1;
                }
            }
        },
    );
    applied
}

fn has_context(name: &str, context: &str) -> bool {
    name.len() > context.len()
        && name.starts_with(context)
        && name.as_bytes()[context.len()] == b'.'
}
