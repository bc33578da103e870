pub mod error;
pub mod property_value;
pub mod registry;
pub mod setter;
pub mod synchronized;
