//! Reservation model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Only pending and confirmed reservations hold their time slot.
    pub fn holds_slot(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

impl FromStr for ReservationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Reservation model matching the `reservation` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Slot start, `HH:MM` 24h
    pub time: String,
    pub number_of_guests: i64,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    /// Derived: true while the status still holds the slot. Kept stored
    /// so the conflict query stays an index-friendly equality check.
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationCreate {
    #[validate(length(min = 10, max = 10, message = "date must be YYYY-MM-DD"))]
    pub date: String,
    #[validate(length(min = 5, max = 5, message = "time must be HH:MM"))]
    pub time: String,
    #[validate(range(min = 1, max = 20, message = "number_of_guests must be between 1 and 20"))]
    pub number_of_guests: i64,
    #[validate(length(max = 240, message = "notes are too long"))]
    pub notes: Option<String>,
}

/// Status update payload; raw string so unknown statuses answer 400
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: String,
}
