pub mod errors;
pub mod game;
pub mod grpc;

use tokio::sync::mpsc;

use game::{
    coordinator::{CoordinatorOptions, SessionCoordinator},
    words::FileWordSource,
};
use grpc::{
    event_loop::EventLoop,
    server::{grpc_server, GameGrpc, FILE_DESCRIPTOR_SET},
    transport::ChannelTransport,
};

use crate::app::types;

/// Log with file and line numbers, `log` records are forwarded as well
pub fn init_tracing() {
    let formatter = tracing_subscriber::fmt::format()
        .with_file(true)
        .with_line_number(true);

    // A subscriber may already be installed, for example by another test
    let _ = tracing_subscriber::fmt().event_format(formatter).try_init();
}

/// Serve the game on an already bound listener until the server fails
pub async fn start_server(
    config: types::ServerConfig,
    tcp_listener: tokio::net::TcpListener,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let server_config = config.server.unwrap_or_default();
    let words_config = config.words.unwrap_or_default();
    let game_config = config.game.unwrap_or_default();

    let (event_sender, event_receiver) = mpsc::channel(server_config.event_queue_size);

    let coordinator = SessionCoordinator::new(
        FileWordSource::new(&words_config.path),
        ChannelTransport::new(),
        CoordinatorOptions {
            expire_empty_rooms: game_config.expire_empty_rooms,
        },
    );
    tokio::spawn(EventLoop::new(coordinator, event_receiver).run());
    tracing::info!(words = %words_config.path, ?game_config, "Game event loop started");

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build()?;

    let addr = tcp_listener.local_addr()?;
    tracing::info!("Server successfully running on {:?}", addr);

    tonic::transport::Server::builder()
        .add_service(reflection_service)
        .add_service(grpc_server::GrpcServer::new(GameGrpc::new(event_sender)))
        .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(tcp_listener))
        .await?;

    Ok(())
}
