//! Feedback repository

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::Feedback;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a feedback entry
    pub async fn create(
        &self,
        customer: RecordId,
        rating: i64,
        comment: Option<String>,
    ) -> RepoResult<Feedback> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE feedback SET
                    customer = $customer,
                    rating = $rating,
                    comment = $comment,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("rating", rating))
            .bind(("comment", comment))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Feedback> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create feedback".to_string()))
    }

    /// All feedback, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Feedback>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM feedback ORDER BY created_at DESC")
            .await?;
        let feedback: Vec<Feedback> = result.take(0)?;
        Ok(feedback)
    }

    /// Find feedback by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Feedback>> {
        let rid = record_id("feedback", id)?;
        let feedback: Option<Feedback> = self.base.db().select(rid).await?;
        Ok(feedback)
    }
}
