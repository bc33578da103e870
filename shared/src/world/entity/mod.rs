pub mod id_allocator;
pub mod network_id;
