//! Who may author an entity's properties and who gets to see them.
//!
//! Everything here is a pure function of the entity's [`AuthorityConfig`],
//! the evaluating side and the remote endpoint in question.

use std::net::SocketAddr;

use crate::HostType;

/// How much a client is trusted with an entity's state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClientAuthorityMode {
    /// The server is the only source of truth
    #[default]
    None,
    /// The owning client (any client when there is no owner) authors the
    /// state and the server accepts it
    TrustClient,
    /// Reserved for input-replay authority; not implemented
    ReplayInputs,
}

/// Outcome of asking whether a side may author properties this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authoring {
    Permitted,
    /// Nothing to send, and nothing wrong with that
    Withheld,
    /// The configured mode cannot be authored at all
    Unsupported,
}

/// Authority attributes of one replicated entity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorityConfig {
    /// No replication traffic is ever sent for the entity
    pub server_only: bool,
    /// Withhold traffic from every endpoint but the owning client
    pub only_send_to_authoritative_client: bool,
    /// Client granted authority; `None` means any client
    pub client_ownership: Option<SocketAddr>,
    pub mode: ClientAuthorityMode,
}

impl AuthorityConfig {
    pub fn authoring(&self, host: HostType) -> Authoring {
        if self.mode == ClientAuthorityMode::ReplayInputs {
            return Authoring::Unsupported;
        }
        if self.server_only {
            return Authoring::Withheld;
        }
        match (host, self.mode) {
            (HostType::Server, _) => Authoring::Permitted,
            (HostType::Client, ClientAuthorityMode::TrustClient) => Authoring::Permitted,
            (HostType::Client, _) => Authoring::Withheld,
        }
    }

    /// Whether a property that has already had its first sync may be sent
    /// again from this side. A trusting server leaves later changes to the
    /// client that authored them.
    pub fn side_may_originate(&self, host: HostType) -> bool {
        match host {
            HostType::Client => true,
            HostType::Server => self.mode != ClientAuthorityMode::TrustClient,
        }
    }

    /// Endpoint filter applied to every outgoing message
    pub fn may_send_to(&self, host: HostType, endpoint: &SocketAddr) -> bool {
        if self.server_only {
            return false;
        }
        match (host, self.only_send_to_authoritative_client, self.client_ownership) {
            (HostType::Server, true, Some(owner)) => owner == *endpoint,
            _ => true,
        }
    }

    /// Whether the authority accepts a properties message from `sender`
    pub fn may_accept_from(&self, sender: &SocketAddr) -> bool {
        match self.mode {
            ClientAuthorityMode::None | ClientAuthorityMode::ReplayInputs => false,
            ClientAuthorityMode::TrustClient => self
                .client_ownership
                .map_or(true, |owner| owner == *sender),
        }
    }
}
