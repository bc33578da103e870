pub mod component;
pub mod delegation;
pub mod entity;
pub mod host;
pub mod remote;
pub mod sync;
