//! Database module
//!
//! Embedded SurrealDB. `DbService::new` opens a RocksDB-backed instance
//! at the configured path, or a throwaway in-memory instance when the
//! path is the literal `"memory"` (used by tests).

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = if db_path == "memory" {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        } else {
            Surreal::new::<RocksDb>(db_path)
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?
        };

        db.use_ns("bistro")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database ready at {}", db_path);
        Ok(Self { db })
    }

    /// Idempotent index definitions. Uniqueness of user emails and menu
    /// item names is enforced here as a backstop behind the
    /// application-level duplicate checks.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE INDEX IF NOT EXISTS user_email_unique ON TABLE user COLUMNS email UNIQUE;
            DEFINE INDEX IF NOT EXISTS menu_item_name_unique ON TABLE menu_item COLUMNS name UNIQUE;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;
        Ok(())
    }
}
