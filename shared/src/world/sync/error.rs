use thiserror::Error;

use crate::world::delegation::authority::ClientAuthorityMode;

/// Fatal conditions raised while authoring replication traffic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A message was built for an entity that has no network id
    #[error("Entity has no network id. Replication messages can only be built after the server assigns one")]
    MissingNetworkId,

    /// The entity's authority mode has no authoring implementation
    #[error("Authority mode {mode:?} cannot author property updates. Use None or TrustClient")]
    UnsupportedAuthorityMode {
        mode: ClientAuthorityMode,
    },
}
