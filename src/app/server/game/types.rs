use super::models::GameSnapshot;
use crate::app::utils;

/// Payload of the reconnect request
pub const REJOIN_MESSAGE: &str = "please rejoin";

/// Identifier the transport assigns to one live connection
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(utils::generate_time_ordered_id("conn"))
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Events a connection can raise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Connect,
    Disconnect,
    Join { name: String, room: String },
    /// `room` is informational, the room the connection is bound to wins
    StartRound { room: String },
    SubmitAnswer { text: String },
}

/// Messages sent from the server to connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Game(GameSnapshot),
    Rejoin(String),
}

impl OutboundMessage {
    pub fn rejoin() -> Self {
        Self::Rejoin(REJOIN_MESSAGE.to_string())
    }
}

/// Where a connection is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unbound,
    Bound,
}
