use tokio::sync::mpsc;

use super::{transport::ChannelTransport, types::Inbound};
use crate::app::server::game::{
    coordinator::SessionCoordinator, types::ClientEvent, words::WordSource,
};

/// The single writer of all game state.
///
/// Events are handled one at a time and to completion, in the order they were queued.
pub struct EventLoop<W> {
    coordinator: SessionCoordinator<W, ChannelTransport>,
    receiver: mpsc::Receiver<Inbound>,
}

impl<W> EventLoop<W>
where
    W: WordSource,
{
    pub fn new(
        coordinator: SessionCoordinator<W, ChannelTransport>,
        receiver: mpsc::Receiver<Inbound>,
    ) -> Self {
        Self {
            coordinator,
            receiver,
        }
    }

    /// Runs until every sender is dropped
    pub async fn run(mut self) {
        while let Some(inbound) = self.receiver.recv().await {
            self.dispatch(inbound);
        }

        tracing::info!("All event senders dropped, game event loop stopped");
    }

    fn dispatch(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Opened {
                connection_id,
                channel,
            } => {
                self.coordinator
                    .transport_mut()
                    .insert_channel(connection_id.clone(), channel);
                self.coordinator.handle(&connection_id, ClientEvent::Connect);
            }
            Inbound::Event {
                connection_id,
                event,
            } => self.coordinator.handle(&connection_id, event),
            Inbound::Closed { connection_id } => {
                self.coordinator
                    .handle(&connection_id, ClientEvent::Disconnect);
                self.coordinator.transport_mut().remove_channel(&connection_id);
            }
        }
    }
}
