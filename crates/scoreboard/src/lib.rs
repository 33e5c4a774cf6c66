//! Scoreboard - persistent high scores over HTTP
//!
//! The game never talks to storage directly. After a game ends the terminal
//! front end submits `{playerName, score}` to a small HTTP service, then
//! fetches the sorted list for its side panel and tells the player where the
//! score landed.
//!
//! # Components
//!
//! - [`protocol`]: JSON bodies, competition ranking and paging
//! - [`store`]: the `ScoreStore` trait and its SQLite implementation
//! - [`server`]: axum router, configuration and `run_server`
//! - [`client`]: fire-and-forget client on a background tokio runtime
//!
//! # Environment Variables
//!
//! Server:
//!
//! - `SCOREBOARD_HOST`: Bind address (default: "127.0.0.1")
//! - `SCOREBOARD_PORT`: Port number (default: 3000, first CLI argument wins)
//! - `SCOREBOARD_DB`: SQLite file (default: "scoreboard.sqlite")
//! - `SCOREBOARD_PAGE_SIZE`: Rows per leaderboard page (default: 5)
//!
//! Client:
//!
//! - `TETRIS_SCOREBOARD_URL`: Service base URL (default: "http://127.0.0.1:3000")
//! - `TETRIS_SCOREBOARD_DISABLED`: Set to "1" or "true" to disable the client
//!
//! # Example Protocol Flow
//!
//! ```text
//! POST /submit-score {"playerName":"ada","score":1200}  -> 200 Score submitted successfully
//! GET  /scoreboard                                     -> [{"name":"ada","score":1200}]
//! GET  /leaderboard?page=1                             -> [{"name":"ada","score":1200,"rank":1}]
//! ```

pub mod client;
pub mod protocol;
pub mod server;
pub mod store;

pub use client::{ClientConfig, ClientError, ScoreboardClient, ScoreboardReply};
pub use protocol::{rank_entries, Placement, RankedEntry, ScoreSubmission, ScoreboardEntry};
pub use server::{router, run_server, serve, ServerConfig, SUBMIT_OK};
pub use store::{ScoreStore, SqliteScoreStore, StoreError};
