//! Scoreboard client runtime integration.
//!
//! Bridges the sync game loop with async HTTP: requests run on a small
//! background tokio runtime and their outcomes come back over a channel that
//! the loop polls once per frame. Nothing here ever blocks the game.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{Placement, ScoreSubmission, ScoreboardEntry};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to start client runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout: Duration::from_secs(5),
            enabled: true,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("TETRIS_SCOREBOARD_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);
        let enabled = !lookup("TETRIS_SCOREBOARD_DISABLED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self {
            base_url,
            enabled,
            ..defaults
        }
    }
}

/// Outcome of a background request
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreboardReply {
    /// Server confirmation text
    Submitted(String),
    /// Full scoreboard, best first
    Entries(Vec<ScoreboardEntry>),
    /// Rank of the score just submitted, sent after its `Entries`
    Placed(Placement),
    /// Human-readable failure (already logged)
    Failed(String),
}

/// Running client instance.
pub struct ScoreboardClient {
    rt: Runtime,
    http: reqwest::Client,
    base_url: String,
    tx: mpsc::UnboundedSender<ScoreboardReply>,
    rx: mpsc::UnboundedReceiver<ScoreboardReply>,
}

impl ScoreboardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("scoreboard-client")
            .enable_all()
            .build()?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            rt,
            http,
            base_url: config.base_url.clone(),
            tx,
            rx,
        })
    }

    /// Start the client from environment variables.
    ///
    /// Returns None if `TETRIS_SCOREBOARD_DISABLED` is set or the runtime
    /// cannot be created.
    pub fn start_from_env() -> Option<Self> {
        let config = ClientConfig::from_env();
        if !config.enabled {
            return None;
        }
        match Self::new(&config) {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "scoreboard client disabled");
                None
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a final score in the background.
    ///
    /// On success the reply sequence is `Submitted`, then the refreshed
    /// `Entries`, then `Placed` with the score's rank.
    pub fn submit(&self, name: &str, score: u32) {
        let http = self.http.clone();
        let submit_url = format!("{}/submit-score", self.base_url);
        let board_url = format!("{}/scoreboard", self.base_url);
        let tx = self.tx.clone();
        let body = ScoreSubmission {
            player_name: name.to_string(),
            score,
        };

        self.rt.spawn(async move {
            match post_score(&http, &submit_url, &body).await {
                Ok(text) => {
                    info!(player = %body.player_name, score = body.score, "score submitted");
                    let _ = tx.send(ScoreboardReply::Submitted(text));
                }
                Err(err) => {
                    warn!(error = %err, "score submission failed");
                    let _ = tx.send(ScoreboardReply::Failed(format!("submit failed: {err}")));
                    return;
                }
            }

            match fetch_scoreboard(&http, &board_url).await {
                Ok(entries) => {
                    let placement = Placement::locate(&entries, &body.player_name, body.score);
                    let _ = tx.send(ScoreboardReply::Entries(entries));
                    if let Some(placement) = placement {
                        info!(rank = placement.rank, total = placement.total, "score placed");
                        let _ = tx.send(ScoreboardReply::Placed(placement));
                    }
                }
                Err(err) => {
                    warn!(error = %err, "scoreboard fetch failed");
                    let _ = tx.send(ScoreboardReply::Failed(format!("scoreboard unavailable: {err}")));
                }
            }
        });
    }

    /// Fetch the scoreboard in the background
    pub fn refresh(&self) {
        let http = self.http.clone();
        let url = format!("{}/scoreboard", self.base_url);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let reply = match fetch_scoreboard(&http, &url).await {
                Ok(entries) => ScoreboardReply::Entries(entries),
                Err(err) => {
                    warn!(error = %err, "scoreboard fetch failed");
                    ScoreboardReply::Failed(format!("scoreboard unavailable: {err}"))
                }
            };
            let _ = tx.send(reply);
        });
    }

    pub fn try_recv(&mut self) -> Option<ScoreboardReply> {
        self.rx.try_recv().ok()
    }
}

async fn post_score(http: &reqwest::Client, url: &str, body: &ScoreSubmission) -> Result<String, ClientError> {
    let response = http.post(url).json(body).send().await?;
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status { status, body: text });
    }
    Ok(text)
}

async fn fetch_scoreboard(http: &reqwest::Client, url: &str) -> Result<Vec<ScoreboardEntry>, ClientError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            "TETRIS_SCOREBOARD_URL" => Some("http://scores.local:8080/".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://scores.local:8080");
        assert!(config.enabled);
    }

    #[test]
    fn config_disabled() {
        let config = ClientConfig::from_lookup(|key| match key {
            "TETRIS_SCOREBOARD_DISABLED" => Some("true".to_string()),
            _ => None,
        });
        assert!(!config.enabled);
        assert_eq!(config.base_url, ClientConfig::default().base_url);
    }

    #[test]
    fn status_error_message() {
        let err = ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server returned 500 Internal Server Error: Internal Server Error"
        );
    }
}
