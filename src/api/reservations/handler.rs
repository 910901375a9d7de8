//! Reservation handlers
//!
//! A time slot (date + time) is exclusive while an active reservation
//! holds it: creation against a held slot answers 409.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;
use std::str::FromStr;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationStatus, ReservationStatusUpdate};
use crate::db::repository::{self, ReservationRepository};
use crate::utils::{AppError, AppResult, ValidatedJson};

#[derive(Debug, Default, Deserialize)]
pub struct ReservationListQuery {
    pub status: Option<String>,
}

/// Create a reservation for the current user
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(req): ValidatedJson<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let repo = ReservationRepository::new(state.get_db());

    if repo.find_active_slot(&req.date, &req.time).await?.is_some() {
        return Err(AppError::conflict(
            "This time slot is already reserved",
        ));
    }

    let customer = repository::record_id("user", &user.id)?;
    let reservation = repo
        .create(customer, req.date, req.time, req.number_of_guests, req.notes)
        .await?;

    tracing::info!(
        user_id = %user.id,
        date = %reservation.date,
        time = %reservation.time,
        "Reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Current user's reservations, soonest slot first
pub async fn list_own(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = ReservationRepository::new(state.get_db());
    let customer = repository::record_id("user", &user.id)?;
    let reservations = repo.find_by_customer(customer).await?;
    Ok(Json(reservations))
}

/// All reservations with an optional status filter (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            ReservationStatus::from_str(s).map_err(|_| {
                AppError::invalid("Status must be one of: pending, confirmed, cancelled")
            })
        })
        .transpose()?;

    let repo = ReservationRepository::new(state.get_db());
    let reservations = repo.find_all(status).await?;
    Ok(Json(reservations))
}

/// Set a new status, recomputing slot occupancy (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ReservationStatusUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    let status = ReservationStatus::from_str(&req.status).map_err(|_| {
        AppError::invalid("Status must be one of: pending, confirmed, cancelled")
    })?;

    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo.update_status(&id, status).await?;

    tracing::info!(reservation_id = %id, status = %req.status, "Reservation status updated");

    Ok(Json(serde_json::json!({
        "message": "Reservation status updated",
        "reservation": reservation,
    })))
}
