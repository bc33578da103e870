pub mod delta_builder;
pub mod visibility;
