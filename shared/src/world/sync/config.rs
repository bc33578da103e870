use crate::world::delegation::authority::AuthorityConfig;

/// Per-entity settings for an [`EntitySynchronizer`](super::engine::EntitySynchronizer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    pub authority: AuthorityConfig,
    /// Send a complete reliable baseline to every recipient on the tick a
    /// new endpoint is discovered
    pub resend_baseline_on_join: bool,
    /// Drop registry entries that were not re-declared during a pass
    pub prune_stale_properties: bool,
}

impl SyncConfig {
    pub fn new(authority: AuthorityConfig) -> Self {
        Self {
            authority,
            ..Self::default()
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            authority: AuthorityConfig::default(),
            resend_baseline_on_join: true,
            prune_stale_properties: false,
        }
    }
}
