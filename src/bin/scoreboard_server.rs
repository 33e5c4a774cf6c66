//! Scoreboard HTTP service.
//!
//! Usage: `scoreboard-server [PORT]`. See `tetris_arcade::scoreboard` for the
//! environment variables it reads.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tetris_arcade::scoreboard::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run_server(ServerConfig::from_env()).await
}
