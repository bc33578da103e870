use glam::{Quat, Vec3};
use replica_shared::{Declarer, SyncedEntity, SynchronizedObject, Transform};

/// Tick spacing of every motion property
pub const MOTION_INTERVAL: u16 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    pub position: Vec3,
    pub rotation: Quat,
    pub speed: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            speed: 0.0,
        }
    }
}

impl SynchronizedObject for Motion {
    fn declare_synchronized_properties(&self, declarer: &mut Declarer) {
        declarer.synchronize(
            "position",
            MOTION_INTERVAL,
            self.position,
            |motion: &mut Motion, position: Vec3| motion.position = position,
        );
        declarer.synchronize(
            "rotation",
            MOTION_INTERVAL,
            self.rotation,
            |motion: &mut Motion, rotation: Quat| motion.rotation = rotation,
        );
        declarer.synchronize(
            "speed",
            MOTION_INTERVAL,
            self.speed,
            |motion: &mut Motion, speed: f32| motion.speed = speed,
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Health {
    pub hit_points: i32,
    pub shielded: bool,
}

impl SynchronizedObject for Health {
    fn declare_synchronized_properties(&self, declarer: &mut Declarer) {
        declarer.synchronize("hit_points", 0, self.hit_points, |health: &mut Health, hp: i32| {
            health.hit_points = hp
        });
        declarer.synchronize("shielded", 0, self.shielded, |health: &mut Health, on: bool| {
            health.shielded = on
        });
    }
}

/// A ship with two synchronized capabilities: `motion` and, while
/// attached, `health`
#[derive(Clone, Debug, PartialEq)]
pub struct TestEntity {
    pub motion: Motion,
    pub health: Health,
    pub health_attached: bool,
}

impl TestEntity {
    pub fn new() -> Self {
        Self {
            motion: Motion::default(),
            health: Health {
                hit_points: 100,
                shielded: false,
            },
            health_attached: true,
        }
    }
}

impl Default for TestEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncedEntity for TestEntity {
    fn type_name(&self) -> &str {
        "ship"
    }

    fn transform(&self) -> Transform {
        Transform::from_translation_rotation(self.motion.position, self.motion.rotation)
    }

    fn visit_synchronized_objects(
        &mut self,
        visitor: &mut dyn FnMut(&str, &mut dyn SynchronizedObject),
    ) {
        visitor("motion", &mut self.motion);
        if self.health_attached {
            visitor("health", &mut self.health);
        }
    }
}
