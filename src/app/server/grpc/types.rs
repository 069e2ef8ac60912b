use super::server::ServerEvent;
use crate::app::server::game::types::{ClientEvent, ConnectionId};

/// Outbound half of one `Play` stream
pub type SessionChannel = tokio::sync::mpsc::Sender<Result<ServerEvent, tonic::Status>>;

/// Capacity of each connection's outbound channel
pub const SESSION_CHANNEL_SIZE: usize = 128;

/// Message from the stream tasks to the game event loop
#[derive(Debug)]
pub enum Inbound {
    /// A stream was opened
    Opened {
        connection_id: ConnectionId,
        channel: SessionChannel,
    },
    Event {
        connection_id: ConnectionId,
        event: ClientEvent,
    },
    /// The client half of the stream ended or failed
    Closed { connection_id: ConnectionId },
}
