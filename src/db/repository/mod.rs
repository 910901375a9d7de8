//! Repository module
//!
//! One repository per table, each a thin wrapper around the shared
//! [`BaseRepository`]. All ids cross the boundary as `"table:id"`
//! strings and are parsed into [`RecordId`] at the edge.

pub mod feedback;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod user;

pub use feedback::FeedbackRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::invalid(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a `"table:id"` string, accepting a bare key for the given table.
pub fn record_id(table: &str, id: &str) -> RepoResult<surrealdb::RecordId> {
    if let Ok(rid) = id.parse::<surrealdb::RecordId>() {
        if rid.table() == table {
            return Ok(rid);
        }
        return Err(RepoError::Validation(format!("Invalid ID: {}", id)));
    }
    Ok(surrealdb::RecordId::from_table_key(table, id))
}

/// Epoch milliseconds, the timestamp format stored on every record
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
