pub mod message_codec;
pub mod replication_message;
