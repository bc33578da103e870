use std::net::SocketAddr;

use replica_shared::{EntitySynchronizer, SyncedEntity};

use super::SentPacket;

/// Loopback endpoint on `port`
pub fn endpoint(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// Feeds every packet addressed to `to` into a client-side synchronizer.
/// Returns how many were handled.
pub fn deliver_to_client<E: SyncedEntity>(
    packets: &[SentPacket],
    to: &SocketAddr,
    synchronizer: &mut EntitySynchronizer,
    entity: &mut E,
) -> usize {
    packets
        .iter()
        .filter(|packet| packet.endpoint == *to)
        .filter(|packet| synchronizer.client_receive(entity, &packet.payload))
        .count()
}

/// Feeds every packet a client sent into the server-side synchronizer as
/// coming from `from`. Returns how many were handled.
pub fn deliver_to_server<E: SyncedEntity>(
    packets: &[SentPacket],
    from: &SocketAddr,
    synchronizer: &mut EntitySynchronizer,
    entity: &mut E,
) -> usize {
    packets
        .iter()
        .filter(|packet| synchronizer.server_receive(entity, from, &packet.payload))
        .count()
}
