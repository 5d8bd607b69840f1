//! luxserver library - collection search over a read-only SQLite store
//!
//! Answers one filter request per TCP connection with denormalized,
//! deterministically ordered object records.

use sqlx::SqlitePool;
use std::time::Duration;

pub mod config;
pub mod db;
pub mod query;
pub mod server;

use config::ServerConfig;

/// State shared by every connection task
///
/// Only the pool is shared; each request acquires its own connection from it.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Bound on one connection's read, process and write; `None` waits forever
    pub request_timeout: Option<Duration>,
    /// Largest accepted request body
    pub max_request_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: &ServerConfig) -> Self {
        Self {
            db,
            request_timeout: config.request_timeout,
            max_request_bytes: config.max_request_bytes,
        }
    }
}
