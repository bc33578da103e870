pub mod packet_exchange;

pub use packet_exchange::{deliver_to_client, deliver_to_server, endpoint};
pub use recording_transport::{RecordingTransport, SentPacket};
