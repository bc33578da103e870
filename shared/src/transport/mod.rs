use std::net::SocketAddr;

use log::warn;

/// Outbound side of whatever carries replication payloads
pub trait Transport {
    /// Endpoints currently connected through this dispatcher
    fn endpoints(&self) -> Vec<SocketAddr>;
    fn send(&mut self, endpoint: &SocketAddr, payload: &[u8], reliable: bool);
}

/// Several dispatchers presented as one. Each send goes to the first
/// dispatcher that lists the endpoint.
#[derive(Default)]
pub struct TransportSet {
    dispatchers: Vec<Box<dyn Transport>>,
}

impl TransportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dispatcher: Box<dyn Transport>) {
        self.dispatchers.push(dispatcher);
    }

    pub fn len(&self) -> usize {
        self.dispatchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispatchers.is_empty()
    }
}

impl Transport for TransportSet {
    fn endpoints(&self) -> Vec<SocketAddr> {
        let mut endpoints = Vec::new();
        for dispatcher in &self.dispatchers {
            for endpoint in dispatcher.endpoints() {
                if !endpoints.contains(&endpoint) {
                    endpoints.push(endpoint);
                }
            }
        }
        endpoints
    }

    fn send(&mut self, endpoint: &SocketAddr, payload: &[u8], reliable: bool) {
        let owner = self
            .dispatchers
            .iter_mut()
            .find(|dispatcher| dispatcher.endpoints().contains(endpoint));
        match owner {
            Some(dispatcher) => dispatcher.send(endpoint, payload, reliable),
            None => warn!("TransportSet: no dispatcher for endpoint {}", endpoint),
        }
    }
}
