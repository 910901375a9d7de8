//! Utility module - shared error types, logging, validation helpers

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
pub use validation::ValidatedJson;
