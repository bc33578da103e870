/// Frame-interval throttling, including across tick wrap-around

use std::collections::HashMap;

use proptest::prelude::*;
use replica_shared::{
    EntitySynchronizer, NetworkId, PropertyValue, ReplicationMessage, SyncConfig, Tick,
};
use replica_test::{assert_no_traffic, endpoint, RecordingTransport, TestEntity, MOTION_INTERVAL};

fn server() -> EntitySynchronizer {
    let mut server = EntitySynchronizer::new(SyncConfig::default());
    server.receive_network_id_from_server(NetworkId::new(1));
    server
}

/// Ticks at which `motion.speed` went out, with the value sent
fn speed_sends(transport: &mut RecordingTransport) -> Vec<(Tick, PropertyValue)> {
    let mut sends = Vec::new();
    for packet in transport.take_sent() {
        if let ReplicationMessage::EntityProperties(properties) = packet.message() {
            for (name, value) in properties.properties() {
                if name == "motion.speed" {
                    sends.push((properties.tick, *value));
                }
            }
        }
    }
    sends
}

proptest! {
    #[test]
    fn sends_are_spaced_by_more_than_the_interval(
        changes in proptest::collection::vec(any::<bool>(), 1..150),
        start in any::<u16>(),
    ) {
        let mut server = server();
        let mut transport = RecordingTransport::new(&[endpoint(5000)]);
        let mut ship = TestEntity::new();
        let mut sends = Vec::new();
        let mut speed_at = HashMap::new();
        let mut tick = start;

        for changed in changes {
            if changed {
                ship.motion.speed += 1.0;
            }
            server.server_update(&mut ship, tick, &mut transport);
            sends.extend(speed_sends(&mut transport));
            speed_at.insert(tick, ship.motion.speed);
            tick = tick.wrapping_add(1);
        }

        prop_assert_eq!(sends[0].0, start);
        for pair in sends.windows(2) {
            prop_assert!(pair[1].0.wrapping_sub(pair[0].0) > MOTION_INTERVAL);
        }
        for (sent_at, value) in &sends {
            prop_assert_eq!(*value, PropertyValue::Float(speed_at[sent_at]));
        }
    }
}

#[test]
fn change_waits_out_the_interval() {
    let mut server = server();
    let mut transport = RecordingTransport::new(&[endpoint(5000)]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 10, &mut transport);
    transport.take_sent();

    ship.motion.speed = 2.0;
    for tick in 11..=15 {
        server.server_update(&mut ship, tick, &mut transport);
    }
    assert_no_traffic!(transport);

    ship.motion.speed = 3.0;
    server.server_update(&mut ship, 16, &mut transport);
    assert_eq!(speed_sends(&mut transport), vec![(16, PropertyValue::Float(3.0))]);
}

#[test]
fn change_that_settles_while_throttled_is_dropped() {
    let mut server = server();
    let mut transport = RecordingTransport::new(&[endpoint(5000)]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 10, &mut transport);
    transport.take_sent();

    ship.motion.speed = 2.0;
    for tick in 11..=30 {
        server.server_update(&mut ship, tick, &mut transport);
    }
    assert_no_traffic!(transport);
}

#[test]
fn nan_speed_is_sent_once() {
    let mut server = server();
    let mut transport = RecordingTransport::new(&[endpoint(5000)]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 10, &mut transport);
    transport.take_sent();

    ship.motion.speed = f32::NAN;
    server.server_update(&mut ship, 16, &mut transport);
    assert_eq!(speed_sends(&mut transport), vec![(16, PropertyValue::Float(f32::NAN))]);

    for tick in 17..40 {
        server.server_update(&mut ship, tick, &mut transport);
    }
    assert_no_traffic!(transport);
}

#[test]
fn interval_survives_tick_wrap() {
    let mut server = server();
    let mut transport = RecordingTransport::new(&[endpoint(5000)]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 65_533, &mut transport);
    transport.take_sent();

    ship.motion.speed = 9.0;
    // 65_533 + 5 wraps to 2
    for tick in [65_535, 0, 1, 2] {
        server.server_update(&mut ship, tick, &mut transport);
    }
    assert_no_traffic!(transport);

    ship.motion.speed = 10.0;
    server.server_update(&mut ship, 3, &mut transport);
    assert_eq!(speed_sends(&mut transport), vec![(3, PropertyValue::Float(10.0))]);
}

#[test]
fn zero_interval_sends_every_changed_tick() {
    let mut server = server();
    let mut transport = RecordingTransport::new(&[endpoint(5000)]);
    let mut ship = TestEntity::new();
    server.server_update(&mut ship, 0, &mut transport);
    transport.take_sent();

    for tick in 1..5u16 {
        ship.health.hit_points = i32::from(tick);
        server.server_update(&mut ship, tick, &mut transport);
    }
    assert_eq!(transport.sent().len(), 4);
    assert!(transport.sent().iter().all(|packet| !packet.reliable));
}
