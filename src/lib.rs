//! Bistro Server - restaurant management backend
//!
//! REST API for a small restaurant: customers register, browse the menu,
//! reserve tables, place orders and leave feedback; administrators manage
//! the menu, reservations, orders and feedback.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, Server, ServerState
//! ├── auth/          # JWT authentication, role middleware
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # order domain: pricing, access guard, mutation service
//! ├── db/            # embedded SurrealDB, models, repositories
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured tracing events for auth decisions
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
