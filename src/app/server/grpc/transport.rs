use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc::error::TrySendError;

use super::{server::ServerEvent, types::SessionChannel};
use crate::app::server::game::{
    coordinator::Transport,
    types::{ConnectionId, OutboundMessage},
};

/// Room groups on top of the per connection stream channels
#[derive(Debug, Default)]
pub struct ChannelTransport {
    channels: HashMap<ConnectionId, SessionChannel>,
    groups: HashMap<String, HashSet<ConnectionId>>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_channel(&mut self, connection_id: ConnectionId, channel: SessionChannel) {
        self.channels.insert(connection_id, channel);
    }

    /// Dropping the sender ends the client's response stream
    pub fn remove_channel(&mut self, connection_id: &ConnectionId) {
        self.channels.remove(connection_id);
        self.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    fn send(&self, connection_id: &ConnectionId, event: ServerEvent) {
        let Some(channel) = self.channels.get(connection_id) else {
            log::warn!("No channel for connection {connection_id}, message dropped");
            return;
        };

        match channel.try_send(Ok(event)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(%connection_id, "Client is not keeping up, message dropped")
            }
            Err(TrySendError::Closed(_)) => {
                tracing::info!(%connection_id, "Client stream already closed")
            }
        }
    }
}

impl Transport for ChannelTransport {
    fn join_group(&mut self, room: &str, connection_id: &ConnectionId) {
        self.groups
            .entry(room.to_string())
            .or_default()
            .insert(connection_id.clone());
    }

    fn leave_group(&mut self, room: &str, connection_id: &ConnectionId) {
        if let Some(members) = self.groups.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                self.groups.remove(room);
            }
        }
    }

    fn emit_to_group(&mut self, room: &str, message: OutboundMessage) {
        let event = ServerEvent::from(message);

        if let Some(members) = self.groups.get(room) {
            for connection_id in members {
                self.send(connection_id, event.clone());
            }
        }
    }

    fn emit_to(&mut self, connection_id: &ConnectionId, message: OutboundMessage) {
        self.send(connection_id, ServerEvent::from(message));
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::app::server::{
        game::{models::GameSnapshot, types::REJOIN_MESSAGE},
        grpc::server::server_event,
    };

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            round: 1,
            room: "R1".to_string(),
            guesser: None,
            players: vec!["A".to_string()],
            word: None,
            hints: vec![],
            guesses: vec![],
        }
    }

    #[test]
    fn group_messages_reach_members_only() {
        let mut transport = ChannelTransport::new();
        let (member_sender, mut member_receiver) = mpsc::channel(4);
        let (outsider_sender, mut outsider_receiver) = mpsc::channel(4);
        let member = ConnectionId::from("conn_a");
        let outsider = ConnectionId::from("conn_b");
        transport.insert_channel(member.clone(), member_sender);
        transport.insert_channel(outsider.clone(), outsider_sender);

        transport.join_group("R1", &member);
        transport.emit_to_group("R1", OutboundMessage::Game(snapshot()));

        let received = member_receiver.try_recv().unwrap().unwrap();
        assert!(matches!(received.event, Some(server_event::Event::Game(_))));
        assert!(outsider_receiver.try_recv().is_err());
    }

    #[test]
    fn direct_message_and_cleanup() {
        let mut transport = ChannelTransport::new();
        let (sender, mut receiver) = mpsc::channel(4);
        let connection_id = ConnectionId::from("conn_a");
        transport.insert_channel(connection_id.clone(), sender);
        transport.join_group("R1", &connection_id);

        transport.emit_to(&connection_id, OutboundMessage::rejoin());
        let received = receiver.try_recv().unwrap().unwrap();
        assert_eq!(
            received.event,
            Some(server_event::Event::Rejoin(REJOIN_MESSAGE.to_string()))
        );

        transport.remove_channel(&connection_id);
        assert!(transport.groups.is_empty());
        // The only sender is gone so the stream ends
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let mut transport = ChannelTransport::new();
        let (sender, mut receiver) = mpsc::channel(1);
        let connection_id = ConnectionId::from("conn_a");
        transport.insert_channel(connection_id.clone(), sender);

        transport.emit_to(&connection_id, OutboundMessage::rejoin());
        transport.emit_to(&connection_id, OutboundMessage::rejoin());

        assert!(receiver.try_recv().is_ok());
        assert!(receiver.try_recv().is_err());
    }
}
