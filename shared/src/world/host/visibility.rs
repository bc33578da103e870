use std::{collections::HashSet, net::SocketAddr};

/// Remote endpoints that have been sent the entity's creation message
#[derive(Default, Debug)]
pub struct VisibleEndpoints {
    endpoints: HashSet<SocketAddr>,
}

impl VisibleEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the endpoint was already visible
    pub fn insert(&mut self, endpoint: SocketAddr) -> bool {
        self.endpoints.insert(endpoint)
    }

    pub fn contains(&self, endpoint: &SocketAddr) -> bool {
        self.endpoints.contains(endpoint)
    }

    pub fn remove(&mut self, endpoint: &SocketAddr) -> bool {
        self.endpoints.remove(endpoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SocketAddr> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.endpoints.clear();
    }
}
