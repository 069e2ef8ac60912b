use clap::Parser;
use hintword::app::{server, types, utils};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ServerArgs {
    /// Path of the server config file
    /// Values can be overridden with `HINTWORD_SERVER_<SECTION>__<KEY>` variables
    #[arg(short, long, default_value = "config/server.toml")]
    pub config: String,
}

// All game state lives on one event loop task, a single thread is plenty
#[tokio::main(flavor = "current_thread")]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    server::init_tracing();

    let args = ServerArgs::parse();
    let config = utils::read_config::<types::ServerConfig>(&args.config, Some("HINTWORD_SERVER"))?;

    let server_address = config.server.clone().unwrap_or_default().address();
    tracing::info!("Attempting to run server on {:?}", server_address);
    let tcp_listener = tokio::net::TcpListener::bind(&server_address).await?;

    server::start_server(config, tcp_listener).await
}
