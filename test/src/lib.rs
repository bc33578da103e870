pub mod helpers;
pub mod test_entity;

pub use helpers::*;
pub use test_entity::{Health, Motion, TestEntity, MOTION_INTERVAL};
