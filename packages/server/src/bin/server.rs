//! WebSocket signaling relay server.
//!
//! Peers connect to `/` to create a room or to `/{room_id}` to enter one, then
//! exchange signaling payloads through the server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sigroom-server
//! cargo run --bin sigroom-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::{CommandFactory, Parser, error::ErrorKind};
use sigroom_server::{
    config::{ConfigError, HeartbeatConfig, ServerConfig},
    domain::IdFactory,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use sigroom_shared::{logger::setup_logger, random::DEFAULT_ID_LENGTH};

#[derive(Parser, Debug)]
#[command(name = "sigroom-server")]
#[command(about = "WebSocket signaling relay with rooms and presence", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds between heartbeat pings
    #[arg(
        long,
        default_value_t = HeartbeatConfig::DEFAULT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    heartbeat_interval_secs: u64,

    /// Seconds to wait for a pong before closing the connection
    #[arg(
        long,
        default_value_t = HeartbeatConfig::DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    heartbeat_timeout_secs: u64,

    /// Location `GET /` redirects to
    #[arg(long, default_value = "https://github.com/")]
    top_redirect: String,

    /// Length of generated room and client ids
    #[arg(
        long,
        default_value_t = DEFAULT_ID_LENGTH as u64,
        value_parser = clap::value_parser!(u64).range(MIN_ID_LENGTH..=MAX_ID_LENGTH)
    )]
    id_length: u64,
}

/// Shorter ids leave too few room ids to draw from.
const MIN_ID_LENGTH: u64 = 8;
const MAX_ID_LENGTH: u64 = 256;

impl TryFrom<Args> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let heartbeat = HeartbeatConfig {
            interval: Duration::from_secs(args.heartbeat_interval_secs),
            timeout: Duration::from_secs(args.heartbeat_timeout_secs),
        };
        heartbeat.validate()?;

        Ok(Self {
            host: args.host,
            port: args.port,
            heartbeat,
            top_redirect: args.top_redirect,
            // Bounded by the clap range
            id_length: args.id_length as usize,
        })
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = match ServerConfig::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => Args::command().error(ErrorKind::ArgumentConflict, e).exit(),
    };

    // Initialize dependencies in order:
    // 1. Repository (room registry)
    // 2. MessagePusher (relay dispatcher)
    // 3. UseCases / AppState
    // 4. Server

    // 1. Create Repository (in-memory registry)
    let repository = Arc::new(InMemoryRoomRepository::new(IdFactory::new(config.id_length)));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let app_state = Arc::new(AppState::new(repository, message_pusher, &config));

    // 4. Create and run the server
    let server = Server::new(app_state);
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
