use std::any::{type_name, Any};

use super::{
    error::PropertyError,
    property_value::{PropertyValue, SyncValue},
};

trait ErasedSetter {
    fn apply(&self, target: &mut dyn Any, value: &PropertyValue) -> Result<(), PropertyError>;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct TypedSetter<O, T> {
    setter: fn(&mut O, T),
}

impl<O: 'static, T: SyncValue> ErasedSetter for TypedSetter<O, T> {
    fn apply(&self, target: &mut dyn Any, value: &PropertyValue) -> Result<(), PropertyError> {
        let Some(object) = target.downcast_mut::<O>() else {
            return Err(PropertyError::TargetTypeMismatch {
                expected: type_name::<O>(),
            });
        };
        let Some(typed) = T::from_value(value) else {
            return Err(PropertyError::ValueKindMismatch {
                expected: T::KIND,
                actual: value.kind(),
            });
        };
        (self.setter)(object, typed);
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Type-erased setter slot of a registry entry. The boxed trampoline is
/// created on first bind; later binds with the same object and value types
/// only swap the function pointer, so steady-state declaration passes do
/// not allocate.
#[derive(Default)]
pub struct Setter {
    inner: Option<Box<dyn ErasedSetter>>,
}

impl Setter {
    pub fn bind<O: 'static, T: SyncValue>(&mut self, setter: fn(&mut O, T)) {
        if let Some(existing) = self.inner.as_mut() {
            if let Some(typed) = existing.as_any_mut().downcast_mut::<TypedSetter<O, T>>() {
                typed.setter = setter;
                return;
            }
        }
        self.inner = Some(Box::new(TypedSetter { setter }));
    }

    pub fn is_bound(&self) -> bool {
        self.inner.is_some()
    }

    pub fn apply(&self, target: &mut dyn Any, value: &PropertyValue) -> Result<(), PropertyError> {
        let Some(inner) = self.inner.as_ref() else {
            return Err(PropertyError::SetterNotBound);
        };
        inner.apply(target, value)
    }
}
