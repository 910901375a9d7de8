//! Reservation repository

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::{Reservation, ReservationStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an active reservation holding the given slot, if any.
    /// A slot is held while `is_active` is true (pending or confirmed).
    pub async fn find_active_slot(
        &self,
        date: &str,
        time: &str,
    ) -> RepoResult<Option<Reservation>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM reservation
                WHERE date = $date AND time = $time AND is_active = true
                LIMIT 1"#,
            )
            .bind(("date", date.to_string()))
            .bind(("time", time.to_string()))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations.into_iter().next())
    }

    /// Create a reservation; the caller has already checked the slot
    pub async fn create(
        &self,
        customer: RecordId,
        date: String,
        time: String,
        number_of_guests: i64,
        notes: Option<String>,
    ) -> RepoResult<Reservation> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE reservation SET
                    customer = $customer,
                    date = $date,
                    time = $time,
                    number_of_guests = $number_of_guests,
                    notes = $notes,
                    status = $status,
                    is_active = true,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("date", date))
            .bind(("time", time))
            .bind(("number_of_guests", number_of_guests))
            .bind(("notes", notes))
            .bind(("status", ReservationStatus::Pending))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<Reservation> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = record_id("reservation", id)?;
        let reservation: Option<Reservation> = self.base.db().select(rid).await?;
        Ok(reservation)
    }

    /// All reservations of one customer, soonest slot first
    pub async fn find_by_customer(&self, customer: RecordId) -> RepoResult<Vec<Reservation>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE customer = $customer ORDER BY date, time")
            .bind(("customer", customer))
            .await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    /// All reservations with an optional status filter, newest first
    pub async fn find_all(
        &self,
        status: Option<ReservationStatus>,
    ) -> RepoResult<Vec<Reservation>> {
        let sql = if status.is_some() {
            "SELECT * FROM reservation WHERE status = $status ORDER BY created_at DESC"
        } else {
            "SELECT * FROM reservation ORDER BY created_at DESC"
        };

        let mut q = self.base.db().query(sql);
        if let Some(status) = status {
            q = q.bind(("status", status));
        }
        let mut result = q.await?;
        let reservations: Vec<Reservation> = result.take(0)?;
        Ok(reservations)
    }

    /// Set a new status, recomputing the derived `is_active` flag
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        let rid = record_id("reservation", id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $rid SET
                    status = $status,
                    is_active = $is_active
                RETURN AFTER"#,
            )
            .bind(("rid", rid))
            .bind(("status", status))
            .bind(("is_active", status.holds_slot()))
            .await?;

        result
            .take::<Option<Reservation>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}
