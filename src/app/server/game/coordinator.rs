use super::{
    directory::{Session, SessionDirectory},
    models::{build_snapshot, Game},
    registry::RoomRegistry,
    types::{ClientEvent, ConnectionId, ConnectionState, OutboundMessage},
    words::WordSource,
};
use crate::app::server::errors::ApiError;

/// What the coordinator needs from the network layer.
///
/// Sends must not wait, a handler always runs to completion.
pub trait Transport {
    fn join_group(&mut self, room: &str, connection_id: &ConnectionId);
    fn leave_group(&mut self, room: &str, connection_id: &ConnectionId);
    fn emit_to_group(&mut self, room: &str, message: OutboundMessage);
    fn emit_to(&mut self, connection_id: &ConnectionId, message: OutboundMessage);
}

#[derive(Clone, Debug)]
pub struct CoordinatorOptions {
    pub expire_empty_rooms: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            expire_empty_rooms: true,
        }
    }
}

type HandlerResult = Result<(), ApiError>;

/// Applies client events to the rooms and tells the transport who to notify
pub struct SessionCoordinator<W, T> {
    registry: RoomRegistry,
    directory: SessionDirectory,
    words: W,
    transport: T,
    options: CoordinatorOptions,
}

impl<W, T> SessionCoordinator<W, T>
where
    W: WordSource,
    T: Transport,
{
    pub fn new(words: W, transport: T, options: CoordinatorOptions) -> Self {
        Self {
            registry: RoomRegistry::new(),
            directory: SessionDirectory::new(),
            words,
            transport,
            options,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn connection_state(&self, connection_id: &ConnectionId) -> ConnectionState {
        match self.directory.resolve(connection_id) {
            Some(_) => ConnectionState::Bound,
            None => ConnectionState::Unbound,
        }
    }

    /// The game the connection is bound to, if any
    pub fn game_of(&self, connection_id: &ConnectionId) -> Option<&Game> {
        self.directory
            .resolve(connection_id)
            .and_then(|session| self.registry.get(&session.room))
    }

    /// Entry point for every event, errors are absorbed here.
    ///
    /// A connection that cannot be resolved is asked to join again.
    pub fn handle(&mut self, connection_id: &ConnectionId, event: ClientEvent) {
        tracing::info!(%connection_id, ?event);

        let result = match event {
            ClientEvent::Connect => {
                tracing::info!(%connection_id, "New client connected");
                Ok(())
            }
            ClientEvent::Disconnect => self.disconnect(connection_id),
            ClientEvent::Join { name, room } => self.join(connection_id, name, room),
            ClientEvent::StartRound { room } => self.start_round(connection_id, room),
            ClientEvent::SubmitAnswer { text } => self.submit_answer(connection_id, text),
        };

        if let Err(error) = result {
            if error.is_unresolved_session() {
                tracing::warn!(%connection_id, "Unknown connection, asking client to rejoin");
                self.transport.emit_to(connection_id, OutboundMessage::rejoin());
            } else {
                tracing::error!(%connection_id, ?error);
            }
        }
    }

    fn join(&mut self, connection_id: &ConnectionId, name: String, room: String) -> HandlerResult {
        if name.is_empty() || room.is_empty() {
            return Err(ApiError::InvalidJoinRequest { name, room });
        }

        let previous = self
            .directory
            .bind(connection_id.clone(), room.clone(), name.clone());

        match previous {
            Some(previous) if previous.room != room => {
                self.release_session(connection_id, &previous)
            }
            Some(previous) if previous.name != name => {
                if let Some(game) = self.registry.get_mut(&room) {
                    game.remove_player(&previous.name);
                }
            }
            _ => {}
        }

        self.registry.find_or_create(&room).add_player(&name);
        self.transport.join_group(&room, connection_id);
        self.broadcast(&room);

        tracing::info!(%connection_id, player = %name, %room, "Player joined the room");
        Ok(())
    }

    fn disconnect(&mut self, connection_id: &ConnectionId) -> HandlerResult {
        // Connections that never joined have nothing to clean up
        let Some(session) = self.directory.unbind(connection_id) else {
            tracing::info!(%connection_id, "Unbound client disconnected");
            return Ok(());
        };

        self.release_session(connection_id, &session);
        Ok(())
    }

    /// Takes the player of a session that no longer holds out of its room.
    ///
    /// The session must already be gone from the directory.
    fn release_session(&mut self, connection_id: &ConnectionId, session: &Session) {
        if let Some(game) = self.registry.get_mut(&session.room) {
            game.remove_player(&session.name);
        }
        self.transport.leave_group(&session.room, connection_id);
        self.broadcast(&session.room);

        if self.options.expire_empty_rooms && !self.directory.is_room_bound(&session.room) {
            self.registry.remove(&session.room);
            tracing::info!(room = %session.room, "Last connection left, room expired");
        }

        tracing::info!(
            %connection_id,
            player = %session.name,
            room = %session.room,
            "Player left the room"
        );
    }

    fn start_round(
        &mut self,
        connection_id: &ConnectionId,
        requested_room: String,
    ) -> HandlerResult {
        let room = self.resolve_session(connection_id)?.room;

        if requested_room != room {
            tracing::info!(
                %connection_id,
                %requested_room,
                %room,
                "Ignoring requested room, using the joined one"
            );
        }

        let game = existing_game(&mut self.registry, &room)?;
        let started = game
            .start(&self.words)
            .map_err(|source| ApiError::RoundNotStarted {
                room: room.clone(),
                source,
            })?;

        if started {
            tracing::info!(
                %room,
                round = game.round(),
                guesser = ?game.guesser(),
                "Round started"
            );
        } else {
            tracing::info!(%room, "No players in the room, round not started");
        }

        self.broadcast(&room);
        Ok(())
    }

    fn submit_answer(&mut self, connection_id: &ConnectionId, text: String) -> HandlerResult {
        let session = self.resolve_session(connection_id)?;

        let game = existing_game(&mut self.registry, &session.room)?;
        game.record_answer(&session.name, text);

        self.broadcast(&session.room);
        Ok(())
    }

    fn resolve_session(&self, connection_id: &ConnectionId) -> Result<Session, ApiError> {
        self.directory
            .resolve(connection_id)
            .cloned()
            .ok_or_else(|| ApiError::UnresolvedSession {
                connection_id: connection_id.to_string(),
            })
    }

    fn broadcast(&mut self, room: &str) {
        match self.registry.get(room) {
            Some(game) => {
                let snapshot = build_snapshot(game);
                self.transport.emit_to_group(room, OutboundMessage::Game(snapshot));
                tracing::debug!(room, "Updated game sent to room");
            }
            None => tracing::error!(room, "No game for room, nothing to send"),
        }
    }
}

/// Bound sessions always point at a live room, a miss means the two went out of sync
fn existing_game<'a>(
    registry: &'a mut RoomRegistry,
    room: &str,
) -> Result<&'a mut Game, ApiError> {
    registry.get_mut(room).ok_or_else(|| ApiError::RoomNotFound {
        room: room.to_string(),
    })
}
