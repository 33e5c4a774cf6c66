//! HTTP scoreboard service.
//!
//! - `POST /submit-score` `{playerName, score}` -> `Score submitted successfully`
//! - `GET /scoreboard` -> `[{name, score}]`, best first
//! - `GET /leaderboard?page=N` -> `[{name, score, rank}]`, one page
//! - `GET /health` -> `ok`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::protocol::{page_of, parse_page, rank_entries, RankedEntry, ScoreSubmission, ScoreboardEntry};
use crate::store::{ScoreStore, SqliteScoreStore, StoreError};

pub const SUBMIT_OK: &str = "Score submitted successfully";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Rows per `/leaderboard` page
    pub page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: PathBuf::from("scoreboard.sqlite"),
            page_size: 5,
        }
    }
}

impl ServerConfig {
    /// Read `SCOREBOARD_*` variables; the first CLI argument overrides the port.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), std::env::args().nth(1))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, port_arg: Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("SCOREBOARD_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = port_arg
            .or_else(|| lookup("SCOREBOARD_PORT"))
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let database_path = lookup("SCOREBOARD_DB")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        let page_size = lookup("SCOREBOARD_PAGE_SIZE")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size);

        Self {
            host,
            port,
            database_path,
            page_size,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<dyn ScoreStore>,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    page: Option<String>,
}

/// Build the service router over any store
pub fn router(store: Arc<dyn ScoreStore>, page_size: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/submit-score", post(submit_score))
        .route("/scoreboard", get(scoreboard))
        .route("/leaderboard", get(leaderboard))
        .with_state(AppState {
            store,
            page_size: page_size.max(1),
        })
        .layer(cors)
}

/// Open the configured database and serve until the process exits
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let store = SqliteScoreStore::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, db = %config.database_path.display(), "scoreboard listening");
    serve(listener, Arc::new(store), config.page_size).await
}

/// Serve on an already-bound listener (tests bind port 0)
pub async fn serve(listener: TcpListener, store: Arc<dyn ScoreStore>, page_size: usize) -> anyhow::Result<()> {
    axum::serve(listener, router(store, page_size)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn submit_score(
    State(state): State<AppState>,
    Json(payload): Json<ScoreSubmission>,
) -> Result<&'static str, (StatusCode, &'static str)> {
    let name = payload.player_name.clone();
    let score = payload.score;
    with_store(state.store, move |store| store.insert(&name, score)).await?;
    info!(player = %payload.player_name, score, "score submitted");
    Ok(SUBMIT_OK)
}

async fn scoreboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScoreboardEntry>>, (StatusCode, &'static str)> {
    let entries = with_store(state.store, |store| store.list()).await?;
    Ok(Json(entries))
}

async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<RankedEntry>>, (StatusCode, &'static str)> {
    let page = parse_page(query.page.as_deref());
    let entries = with_store(state.store, |store| store.list()).await?;
    Ok(Json(page_of(&rank_entries(&entries), page, state.page_size)))
}

/// Run a blocking store call off the async workers, mapping failures to 500
async fn with_store<T, F>(store: Arc<dyn ScoreStore>, f: F) -> Result<T, (StatusCode, &'static str)>
where
    T: Send + 'static,
    F: FnOnce(&dyn ScoreStore) -> Result<T, StoreError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(store.as_ref())).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            error!(error = %err, "score store failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))
        }
        Err(err) => {
            error!(error = %err, "score store task failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR))
        }
    }
}
