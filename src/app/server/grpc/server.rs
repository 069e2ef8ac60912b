use tokio::sync::mpsc;

pub use hintword_grpc::{
    client_event, grpc_client, grpc_server, server_event, AnswerRequest, ClientEvent, GameState,
    JoinRequest, ServerEvent, StartRequest, FILE_DESCRIPTOR_SET,
};

use super::{functions, types::Inbound};
use crate::app::server::game::{
    models::GameSnapshot,
    types::{self, OutboundMessage},
};

mod hintword_grpc {
    // The string specified here must match the proto package name
    tonic::include_proto!("server");

    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("grpc");
}

impl From<GameSnapshot> for GameState {
    fn from(snapshot: GameSnapshot) -> Self {
        Self {
            round: snapshot.round,
            room: snapshot.room,
            guesser: snapshot.guesser,
            players: snapshot.players,
            word: snapshot.word,
            hints: snapshot.hints,
            guesses: snapshot.guesses,
        }
    }
}

impl From<GameState> for GameSnapshot {
    fn from(state: GameState) -> Self {
        Self {
            round: state.round,
            room: state.room,
            guesser: state.guesser,
            players: state.players,
            word: state.word,
            hints: state.hints,
            guesses: state.guesses,
        }
    }
}

impl From<OutboundMessage> for ServerEvent {
    fn from(message: OutboundMessage) -> Self {
        let event = match message {
            OutboundMessage::Game(snapshot) => server_event::Event::Game(snapshot.into()),
            OutboundMessage::Rejoin(text) => server_event::Event::Rejoin(text),
        };

        Self { event: Some(event) }
    }
}

/// Events without a payload are ignored
impl TryFrom<ClientEvent> for types::ClientEvent {
    type Error = ();

    fn try_from(message: ClientEvent) -> Result<Self, Self::Error> {
        match message.event.ok_or(())? {
            client_event::Event::Join(JoinRequest { name, room }) => Ok(Self::Join { name, room }),
            client_event::Event::GameStart(StartRequest { room }) => Ok(Self::StartRound { room }),
            client_event::Event::SendAnswer(AnswerRequest { answer }) => {
                Ok(Self::SubmitAnswer { text: answer })
            }
        }
    }
}

pub struct GameGrpc {
    pub events: mpsc::Sender<Inbound>,
}

impl GameGrpc {
    pub fn new(events: mpsc::Sender<Inbound>) -> Self {
        Self { events }
    }
}

pub type PlayStream = std::pin::Pin<
    Box<dyn tokio_stream::Stream<Item = Result<ServerEvent, tonic::Status>> + Send>,
>;

#[tonic::async_trait]
impl grpc_server::Grpc for GameGrpc {
    type PlayStream = PlayStream;

    async fn play(
        &self,
        request: tonic::Request<tonic::Streaming<ClientEvent>>,
    ) -> Result<tonic::Response<Self::PlayStream>, tonic::Status> {
        tracing::info!(remote_addr = ?request.remote_addr(), "Play stream requested");

        let result = functions::play::play(self, request.into_inner()).await;

        if let Err(error) = &result {
            tracing::error!(?error);
        }

        Ok(tonic::Response::new(result?))
    }
}
