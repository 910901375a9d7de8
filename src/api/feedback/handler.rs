//! Feedback handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use http::StatusCode;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate};
use crate::db::repository::{self, FeedbackRepository};
use crate::utils::{AppError, AppResult, ValidatedJson};

/// Submit feedback as the current user
pub async fn submit(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(req): ValidatedJson<FeedbackCreate>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let repo = FeedbackRepository::new(state.get_db());
    let customer = repository::record_id("user", &user.id)?;
    let feedback = repo.create(customer, req.rating, req.comment).await?;

    tracing::info!(user_id = %user.id, rating = feedback.rating, "Feedback submitted");

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// All feedback, newest first (admin)
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Feedback>>> {
    let repo = FeedbackRepository::new(state.get_db());
    let feedback = repo.find_all().await?;
    Ok(Json(feedback))
}

/// View one feedback entry; owners see their own, admins see all
pub async fn view(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Feedback>> {
    let repo = FeedbackRepository::new(state.get_db());
    let feedback = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Feedback not found"))?;

    if !user.is_admin() && feedback.customer.to_string() != user.id {
        return Err(AppError::forbidden(
            "You do not have access to this feedback",
        ));
    }

    Ok(Json(feedback))
}
