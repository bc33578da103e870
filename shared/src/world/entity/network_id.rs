use std::fmt;

use replica_serde::{BitReader, BitWrite, Serde, SerdeErr, VariableInteger};

/// Server-assigned identifier of a replicated entity. Unique for the
/// lifetime of the entity; an entity without one does not replicate.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct NetworkId(u32);

impl NetworkId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn to_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Serde for NetworkId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        VariableInteger(self.0).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(VariableInteger::de(reader)?.get()))
    }
}
