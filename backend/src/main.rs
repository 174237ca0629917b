//! Service entry point: configuration, logging, and server bootstrap.

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server};

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "User management HTTP API")]
struct Args {
    /// Host to bind the HTTP listener to.
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to bind the HTTP listener to.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let bind_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr))?;
    server.await
}
