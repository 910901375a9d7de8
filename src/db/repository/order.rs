//! Order repository
//!
//! Item mutations go through [`OrderRepository::update_items_cas`], a
//! compare-and-swap on the order's `version` field. The UPDATE carries a
//! `WHERE version = $expected` guard, so a concurrent writer who got
//! there first leaves the statement matching nothing and the caller
//! retries against the fresh record.

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::{Order, OrderLine, OrderStatus, OrderType};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order with server-computed totals
    pub async fn create(
        &self,
        customer: RecordId,
        reservation: Option<RecordId>,
        items: Vec<OrderLine>,
        total_price: f64,
        order_type: OrderType,
    ) -> RepoResult<Order> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE orders SET
                    customer = $customer,
                    reservation = $reservation,
                    items = $items,
                    total_price = $total_price,
                    order_type = $order_type,
                    status = $status,
                    version = 0,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("customer", customer))
            .bind(("reservation", reservation))
            .bind(("items", items))
            .bind(("total_price", total_price))
            .bind(("order_type", order_type))
            .bind(("status", OrderStatus::Pending))
            .bind(("now", now))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = record_id("orders", id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// All orders of one customer, newest first
    pub async fn find_by_customer(&self, customer: RecordId) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE customer = $customer ORDER BY created_at DESC")
            .bind(("customer", customer))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// All orders with optional status / type filters, newest first
    pub async fn find_filtered(
        &self,
        status: Option<OrderStatus>,
        order_type: Option<OrderType>,
    ) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = $status");
        }
        if order_type.is_some() {
            conditions.push("order_type = $order_type");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM orders{} ORDER BY created_at DESC",
            where_clause
        );

        let mut q = self.base.db().query(sql);
        if let Some(status) = status {
            q = q.bind(("status", status));
        }
        if let Some(order_type) = order_type {
            q = q.bind(("order_type", order_type));
        }
        let mut result = q.await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Set a new status. Transitions are flat; validation of the status
    /// string happens at the handler.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let rid = record_id("orders", id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $rid SET
                    status = $status,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("rid", rid))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Compare-and-swap replacement of the item list.
    ///
    /// Returns `Ok(None)` when the version guard did not match — the
    /// record changed underneath the caller, who refetches and retries.
    pub async fn update_items_cas(
        &self,
        id: &str,
        expected_version: i64,
        items: Vec<OrderLine>,
        total_price: f64,
    ) -> RepoResult<Option<Order>> {
        let rid = record_id("orders", id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $rid SET
                    items = $items,
                    total_price = $total_price,
                    version = version + 1,
                    updated_at = $now
                WHERE version = $expected
                RETURN AFTER"#,
            )
            .bind(("rid", rid))
            .bind(("items", items))
            .bind(("total_price", total_price))
            .bind(("now", now_millis()))
            .bind(("expected", expected_version))
            .await?;

        let updated: Option<Order> = result.take(0)?;
        Ok(updated)
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<Order> {
        let rid = record_id("orders", id)?;
        let deleted: Option<Order> = self
            .base
            .db()
            .query("DELETE $rid RETURN BEFORE")
            .bind(("rid", rid))
            .await?
            .take(0)?;

        deleted.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
