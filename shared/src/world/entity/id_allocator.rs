use super::network_id::NetworkId;

/// Source of globally unique entity identifiers, consulted once per entity
/// on the authority.
pub trait NetworkIdAllocator {
    fn allocate(&mut self) -> NetworkId;
}

/// Hands out increasing identifiers and never recycles them, so an id can
/// not be observed twice by a peer that still holds stale messages.
pub struct SequentialNetworkIdAllocator {
    next: u32,
}

impl SequentialNetworkIdAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialNetworkIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkIdAllocator for SequentialNetworkIdAllocator {
    /// # Panics
    ///
    /// Panics once the `u32` identifier space is exhausted.
    fn allocate(&mut self) -> NetworkId {
        let id = self.next;
        let Some(next) = self.next.checked_add(1) else {
            panic!("SequentialNetworkIdAllocator: identifier space exhausted");
        };
        self.next = next;
        NetworkId::new(id)
    }
}
