/// Authority rules as seen from the outside: who may send, who receives,
/// and which inbound messages are accepted

use std::net::SocketAddr;

use replica_shared::{
    AuthorityConfig, BitMessageCodec, ClientAuthorityMode, EntityCreate, EntityProperties,
    EntitySynchronizer, MessageCodec, NetworkId, PropertyValue, SyncConfig, Transform,
};
use replica_test::{
    assert_no_traffic, assert_properties, endpoint, RecordingTransport, TestEntity,
};

fn synchronizer(authority: AuthorityConfig, id: u32) -> EntitySynchronizer {
    let mut synchronizer = EntitySynchronizer::new(SyncConfig::new(authority));
    synchronizer.receive_network_id_from_server(NetworkId::new(id));
    synchronizer
}

fn trust_client(owner: Option<SocketAddr>) -> AuthorityConfig {
    AuthorityConfig {
        mode: ClientAuthorityMode::TrustClient,
        client_ownership: owner,
        ..AuthorityConfig::default()
    }
}

fn hit_points_message(id: u32, hit_points: i32) -> Vec<u8> {
    BitMessageCodec::packed().serialize(
        &EntityProperties {
            network_id: NetworkId::new(id),
            tick: 0,
            is_client_message: true,
            names: vec!["health.hit_points".to_string()],
            values: vec![PropertyValue::Int(hit_points)],
        }
        .into(),
    )
}

#[test]
fn server_only_never_sends() {
    let authority = AuthorityConfig {
        server_only: true,
        ..AuthorityConfig::default()
    };
    let mut server = synchronizer(authority.clone(), 1);
    let mut client = synchronizer(authority, 1);
    let mut transport = RecordingTransport::new(&[endpoint(1), endpoint(2)]);
    let mut ship = TestEntity::new();

    for tick in 0..40u16 {
        ship.motion.speed = f32::from(tick);
        ship.health.hit_points = i32::from(tick);
        server.server_update(&mut ship, tick, &mut transport);
        client.client_update(&mut ship, tick, &mut transport);
    }

    assert_no_traffic!(transport);
    assert!(server.visible_endpoints().is_empty());
}

#[test]
fn owner_only_entities_reach_only_the_owner() {
    let (a, b) = (endpoint(1), endpoint(2));
    let authority = AuthorityConfig {
        only_send_to_authoritative_client: true,
        client_ownership: Some(b),
        ..AuthorityConfig::default()
    };
    let mut server = synchronizer(authority, 1);
    let mut transport = RecordingTransport::new(&[a, b]);
    let mut ship = TestEntity::new();

    for tick in 0..25u16 {
        ship.health.hit_points = 100 - i32::from(tick);
        server.server_update(&mut ship, tick, &mut transport);
    }

    assert!(transport.sent_to(&a).is_empty());
    assert!(transport.sent().len() > 2);
    assert!(transport.sent().iter().all(|packet| packet.endpoint == b));
    assert!(!server.visible_endpoints().contains(&a));
    assert!(server.visible_endpoints().contains(&b));
}

#[test]
fn trusting_server_rejects_foreign_senders() {
    let (owner, intruder) = (endpoint(2), endpoint(3));
    let mut server = synchronizer(trust_client(Some(owner)), 1);
    let mut transport = RecordingTransport::new(&[owner]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 0, &mut transport);

    let payload = hit_points_message(1, 12);
    assert!(!server.server_receive(&mut ship, &intruder, &payload));
    assert_eq!(ship.health.hit_points, 100);
    let entry = server.registry().get("health.hit_points").unwrap();
    assert!(!entry.has_received_initial_sync());
    assert_eq!(*entry.current_value(), PropertyValue::Int(100));

    assert!(server.server_receive(&mut ship, &owner, &payload));
    assert_eq!(ship.health.hit_points, 12);
    assert!(server
        .registry()
        .get("health.hit_points")
        .unwrap()
        .has_received_initial_sync());
}

#[test]
fn trusting_server_without_owner_accepts_any_client() {
    let mut server = synchronizer(trust_client(None), 1);
    let mut ship = TestEntity::new();

    assert!(server.server_receive(&mut ship, &endpoint(40), &hit_points_message(1, 7)));
    assert_eq!(ship.health.hit_points, 7);
    assert!(server.server_receive(&mut ship, &endpoint(41), &hit_points_message(1, 8)));
    assert_eq!(ship.health.hit_points, 8);
}

#[test]
fn server_authority_accepts_nothing_inbound() {
    let mut server = synchronizer(AuthorityConfig::default(), 1);
    let mut ship = TestEntity::new();

    assert!(!server.server_receive(&mut ship, &endpoint(2), &hit_points_message(1, 12)));
    assert_eq!(ship.health.hit_points, 100);
}

#[test]
fn replay_inputs_messages_are_ignored() {
    let authority = AuthorityConfig {
        mode: ClientAuthorityMode::ReplayInputs,
        ..AuthorityConfig::default()
    };
    let mut server = synchronizer(authority, 1);
    let mut ship = TestEntity::new();

    assert!(!server.server_receive(&mut ship, &endpoint(2), &hit_points_message(1, 12)));
    assert_eq!(ship.health.hit_points, 100);
    assert!(server.registry().is_empty());
}

#[test]
fn non_property_messages_are_not_handled() {
    let mut server = synchronizer(trust_client(None), 1);
    let mut ship = TestEntity::new();
    let create = BitMessageCodec::packed().serialize(
        &EntityCreate {
            network_id: NetworkId::new(1),
            type_name: "ship".to_string(),
            transform: Transform::IDENTITY,
        }
        .into(),
    );

    assert!(!server.server_receive(&mut ship, &endpoint(2), &create));
    assert!(!server.server_receive(&mut ship, &endpoint(2), &hit_points_message(2, 5)));
    assert!(!server.server_receive(&mut ship, &endpoint(2), &[]));
    assert_eq!(ship.health.hit_points, 100);
}

#[test]
fn client_only_originates_what_it_received() {
    let server_addr = endpoint(9000);
    let mut client = synchronizer(trust_client(None), 4);
    let mut transport = RecordingTransport::new(&[server_addr]);
    let mut ship = TestEntity::new();

    for tick in 0..10u16 {
        ship.motion.speed = f32::from(tick);
        client.client_update(&mut ship, tick, &mut transport);
    }
    assert_no_traffic!(transport);

    assert!(client.client_receive(&mut ship, &hit_points_message(4, 55)));
    assert_eq!(ship.health.hit_points, 55);

    client.client_update(&mut ship, 10, &mut transport);
    let sent = transport.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].endpoint, server_addr);
    assert_properties!(sent[0], ["health.hit_points"]);
    for name in ["motion.position", "motion.rotation", "motion.speed", "health.shielded"] {
        assert!(!client.registry().get(name).unwrap().has_performed_initial_sync());
    }
}

#[test]
fn client_without_authority_never_sends() {
    let mut client = synchronizer(AuthorityConfig::default(), 4);
    let mut transport = RecordingTransport::new(&[endpoint(9000)]);
    let mut ship = TestEntity::new();

    assert!(client.client_receive(&mut ship, &hit_points_message(4, 55)));
    for tick in 0..20u16 {
        ship.health.hit_points = i32::from(tick);
        client.client_update(&mut ship, tick, &mut transport);
    }

    assert_no_traffic!(transport);
}
