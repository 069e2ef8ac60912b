use std::collections::HashMap;

use super::types::ConnectionId;

/// Who a connection is: the room key of its game and its player name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub room: String,
    pub name: String,
}

/// Maps live connections to the game and player they joined as.
///
/// This is the only way to know who a connection is after the transport reconnected.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: HashMap<ConnectionId, Session>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, connection_id: &ConnectionId) -> Option<&Session> {
        let session = self.sessions.get(connection_id);

        match session {
            Some(_) => tracing::debug!(%connection_id, "Session found"),
            None => tracing::debug!(%connection_id, "Session not found"),
        }

        session
    }

    /// Any earlier binding of the connection is replaced and handed back
    pub fn bind(
        &mut self,
        connection_id: ConnectionId,
        room: String,
        name: String,
    ) -> Option<Session> {
        let previous = self
            .sessions
            .insert(connection_id.clone(), Session { room, name });

        if let Some(previous) = &previous {
            tracing::info!(%connection_id, ?previous, "Connection was already bound, replaced");
        }

        previous
    }

    pub fn unbind(&mut self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions.remove(connection_id)
    }

    /// Whether any connection is still bound to the room
    pub fn is_room_bound(&self, room: &str) -> bool {
        self.sessions.values().any(|session| session.room == room)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
