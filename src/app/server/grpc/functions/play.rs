use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use crate::app::server::{
    errors::{self, ResultExtApp},
    game::types::{self, ConnectionId},
    grpc::{
        server::{ClientEvent, GameGrpc, PlayStream},
        types::{Inbound, SESSION_CHANNEL_SIZE},
    },
};

/// Turn one `Play` stream into a connection of the game.
///
/// Opening the stream connects, every client message becomes an event and the end of the
/// client half disconnects. Everything is forwarded to the event loop, which owns the state.
pub async fn play(
    state: &GameGrpc,
    mut inbound_stream: tonic::Streaming<ClientEvent>,
) -> Result<PlayStream, errors::ApiError> {
    let connection_id = ConnectionId::generate();
    let (response_sender, response_receiver) = mpsc::channel(SESSION_CHANNEL_SIZE);

    state
        .events
        .send(Inbound::Opened {
            connection_id: connection_id.clone(),
            channel: response_sender,
        })
        .await
        .to_event_loop_closed()?;

    let events = state.events.clone();

    // Reads the client half until it ends, the event loop writes to the response half
    tokio::spawn(async move {
        while let Some(message) = inbound_stream.next().await {
            match message {
                Ok(client_event) => {
                    let Ok(event) = types::ClientEvent::try_from(client_event) else {
                        tracing::warn!(%connection_id, "Empty client event ignored");
                        continue;
                    };

                    let forwarded = events
                        .send(Inbound::Event {
                            connection_id: connection_id.clone(),
                            event,
                        })
                        .await;

                    if forwarded.is_err() {
                        log::error!("Event loop stopped, closing stream of {connection_id}");
                        return;
                    }
                }
                Err(status) => {
                    tracing::info!(%connection_id, ?status, "Client stream failed");
                    break;
                }
            }
        }

        tracing::info!(%connection_id, "Client stream ended");
        if events.send(Inbound::Closed { connection_id }).await.is_err() {
            log::error!("Event loop stopped before the disconnect could be handled");
        }
    });

    let output_stream = tokio_stream::wrappers::ReceiverStream::new(response_receiver);
    Ok(Box::pin(output_stream) as PlayStream)
}
