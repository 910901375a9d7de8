//! Shared server state

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::Role;
use crate::db::repository::UserRepository;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service,
        };

        state.seed_admin().await?;

        Ok(state)
    }

    /// Create the seed admin account when both ADMIN_EMAIL and
    /// ADMIN_PASSWORD are configured and the account does not exist yet.
    async fn seed_admin(&self) -> Result<(), AppError> {
        let (Some(email), Some(password)) = (
            self.config.admin_email.as_deref(),
            self.config.admin_password.as_deref(),
        ) else {
            return Ok(());
        };

        let users = UserRepository::new(self.db.clone());
        if users.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        users
            .create("Administrator".into(), email.into(), password, Role::Admin)
            .await?;
        tracing::info!(email, "Seed admin account created");
        Ok(())
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
