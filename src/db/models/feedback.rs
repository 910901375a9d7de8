//! Feedback model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Feedback model matching the `feedback` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// 1..=5 stars
    pub rating: i64,
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Create feedback payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackCreate {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i64,
    #[validate(length(max = 1000, message = "comment is too long"))]
    pub comment: Option<String>,
}
