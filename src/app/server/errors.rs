use thiserror::Error;

/// Failure to draw a secret word for a round
#[derive(Error, Debug)]
pub enum WordSourceError {
    #[error("The word list at {path} could not be read")]
    CorpusUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("The word list does not contain any words")]
    CorpusEmpty,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Join request needs both a name and a room, got name={name:?} room={room:?}")]
    InvalidJoinRequest { name: String, room: String },
    #[error("Connection {connection_id} is not bound to any game")]
    UnresolvedSession { connection_id: String },
    #[error("Round could not be started in room {room}")]
    RoundNotStarted {
        room: String,
        #[source]
        source: WordSourceError,
    },
    #[error("No game exists for room {room}")]
    RoomNotFound { room: String },
    #[error("The game event loop is no longer running")]
    EventLoopClosed,
}

impl ApiError {
    pub fn is_unresolved_session(&self) -> bool {
        matches!(self, ApiError::UnresolvedSession { .. })
    }
}

impl From<ApiError> for tonic::Status {
    fn from(value: ApiError) -> Self {
        log::error!("api_error={value:?}");
        match value {
            ApiError::InvalidJoinRequest { .. } => {
                Self::new(tonic::Code::InvalidArgument, value.to_string())
            }
            ApiError::UnresolvedSession { .. } => {
                Self::new(tonic::Code::FailedPrecondition, value.to_string())
            }
            ApiError::RoundNotStarted { .. } => Self::new(tonic::Code::Internal, value.to_string()),
            ApiError::RoomNotFound { .. } => Self::new(tonic::Code::NotFound, value.to_string()),
            ApiError::EventLoopClosed => Self::new(tonic::Code::Unavailable, value.to_string()),
        }
    }
}

pub trait ResultExtApp<T> {
    /// The receiving end of the game event loop is gone
    fn to_event_loop_closed(self) -> Result<T, ApiError>;
}

impl<T, E> ResultExtApp<T> for Result<T, tokio::sync::mpsc::error::SendError<E>> {
    fn to_event_loop_closed(self) -> Result<T, ApiError> {
        self.map_err(|_| ApiError::EventLoopClosed)
    }
}
