//! # Entity synchronization
//!
//! [`EntitySynchronizer`](engine::EntitySynchronizer) is the per-entity
//! entry point the host's scheduler drives once per tick.
//!
//! ## Outgoing
//! 1. Every synchronized object of the entity re-declares its properties
//!    into the registry under its own context name.
//! 2. On the server, endpoints that have not seen the entity get a reliable
//!    `EntityCreate` and join the visibility set.
//! 3. The delta builder picks the properties that are due, given their
//!    cadence and the entity's authority, and marks them synced.
//! 4. The batch is encoded once and sent to every recipient, reliably if
//!    it carries any first sync.
//!
//! ## Incoming
//! A payload is decoded, matched to the entity by network id and, on the
//! server, checked against the authority's sender rules. Accepted values
//! run the setters bound during a fresh declaration pass.
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | per-entity orchestrator |
//! | [`config`] | per-entity settings |
//! | [`error`]  | fatal authoring conditions |

pub mod config;
pub mod engine;
pub mod error;
