//! Order mutation service
//!
//! All order writes funnel through here: existence check, access guard,
//! price recomputation and the versioned write, in that order. Item
//! edits retry a few times on version conflicts before giving up with
//! 409, since each retry re-reads the order and re-prices the lines.

use std::str::FromStr;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{PricingResolver, ensure_can_access};
use crate::auth::CurrentUser;
use crate::db::models::{
    Order, OrderAddItem, OrderCreate, OrderLine, OrderRemoveItem, OrderStatus, OrderType,
};
use crate::db::repository::{
    self, MenuItemRepository, OrderRepository, ReservationRepository,
};
use crate::utils::{AppError, AppResult};

/// Attempts before an item mutation reports a version conflict
const MAX_CAS_RETRIES: u32 = 3;

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    reservations: ReservationRepository,
    pricing: PricingResolver,
}

impl OrderService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            reservations: ReservationRepository::new(db.clone()),
            pricing: PricingResolver::new(MenuItemRepository::new(db)),
        }
    }

    fn customer_id(user: &CurrentUser) -> AppResult<RecordId> {
        Ok(repository::record_id("user", &user.id)?)
    }

    /// Create an order for the current user at current menu prices
    pub async fn create(&self, user: &CurrentUser, data: OrderCreate) -> AppResult<Order> {
        let customer = Self::customer_id(user)?;

        let reservation = match data.reservation_id {
            Some(ref id) => {
                let found = self
                    .reservations
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Reservation not found"))?;
                found.id
            }
            None => None,
        };

        let mut lines: Vec<OrderLine> = Vec::new();
        for input in &data.items {
            let menu_item = repository::record_id("menu_item", &input.menu_item_id)?;
            merge_line(&mut lines, menu_item, input.quantity)?;
        }

        let total_price = self.pricing.total_for(&lines).await?;

        let order = self
            .orders
            .create(customer, reservation, lines, total_price, data.order_type)
            .await?;
        Ok(order)
    }

    /// Add a quantity of one menu item, merging into an existing line
    pub async fn add_item(
        &self,
        user: &CurrentUser,
        order_id: &str,
        data: OrderAddItem,
    ) -> AppResult<Order> {
        let menu_item = repository::record_id("menu_item", &data.menu_item_id)?;

        for _ in 0..MAX_CAS_RETRIES {
            let order = self.fetch_guarded(user, order_id).await?;

            let mut lines = order.items.clone();
            merge_line(&mut lines, menu_item.clone(), data.quantity)?;

            let total_price = self.pricing.total_for(&lines).await?;

            if let Some(updated) = self
                .orders
                .update_items_cas(order_id, order.version, lines, total_price)
                .await?
            {
                return Ok(updated);
            }
            tracing::debug!(order_id, "version conflict on add_item, retrying");
        }

        Err(AppError::conflict(
            "Order was modified concurrently, please retry",
        ))
    }

    /// Remove one menu item's whole line from the order
    pub async fn remove_item(
        &self,
        user: &CurrentUser,
        order_id: &str,
        data: OrderRemoveItem,
    ) -> AppResult<Order> {
        let menu_item = repository::record_id("menu_item", &data.menu_item_id)?;

        for _ in 0..MAX_CAS_RETRIES {
            let order = self.fetch_guarded(user, order_id).await?;

            let before = order.items.len();
            let lines: Vec<OrderLine> = order
                .items
                .iter()
                .filter(|l| l.menu_item != menu_item)
                .cloned()
                .collect();
            if lines.len() == before {
                return Err(AppError::not_found("Item is not part of this order"));
            }

            let total_price = self.pricing.total_for(&lines).await?;

            if let Some(updated) = self
                .orders
                .update_items_cas(order_id, order.version, lines, total_price)
                .await?
            {
                return Ok(updated);
            }
            tracing::debug!(order_id, "version conflict on remove_item, retrying");
        }

        Err(AppError::conflict(
            "Order was modified concurrently, please retry",
        ))
    }

    /// Delete an order (owner or admin)
    pub async fn delete(&self, user: &CurrentUser, order_id: &str) -> AppResult<Order> {
        self.fetch_guarded(user, order_id).await?;
        Ok(self.orders.delete(order_id).await?)
    }

    /// Set a new status; transitions are flat
    pub async fn update_status(&self, order_id: &str, status: &str) -> AppResult<Order> {
        let status = OrderStatus::from_str(status).map_err(|_| {
            AppError::invalid("Status must be one of: pending, preparing, completed, cancelled")
        })?;
        Ok(self.orders.update_status(order_id, status).await?)
    }

    /// Current user's orders, newest first
    pub async fn list_for_customer(&self, user: &CurrentUser) -> AppResult<Vec<Order>> {
        let customer = Self::customer_id(user)?;
        Ok(self.orders.find_by_customer(customer).await?)
    }

    /// All orders with optional status / type filters (admin)
    pub async fn list_all(
        &self,
        status: Option<&str>,
        order_type: Option<&str>,
    ) -> AppResult<Vec<Order>> {
        let status = status
            .map(|s| {
                OrderStatus::from_str(s).map_err(|_| {
                    AppError::invalid(
                        "Status must be one of: pending, preparing, completed, cancelled",
                    )
                })
            })
            .transpose()?;
        let order_type = order_type
            .map(|t| {
                OrderType::from_str(t)
                    .map_err(|_| AppError::invalid("Order type must be dine-in or pre-order"))
            })
            .transpose()?;

        Ok(self.orders.find_filtered(status, order_type).await?)
    }

    /// Fetch the order and run the owner-or-admin guard. 404 before 403.
    async fn fetch_guarded(&self, user: &CurrentUser, order_id: &str) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;
        ensure_can_access(user, &order.customer)?;
        Ok(order)
    }
}

/// Add quantity to an existing line or append a new one. At most one
/// line per menu item survives. Merging must not overflow the line
/// quantity; a sum past i64::MAX answers 400.
fn merge_line(lines: &mut Vec<OrderLine>, menu_item: RecordId, quantity: i64) -> AppResult<()> {
    if let Some(line) = lines.iter_mut().find(|l| l.menu_item == menu_item) {
        line.quantity = line
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| AppError::invalid("Item quantity is too large"))?;
    } else {
        lines.push(OrderLine {
            menu_item,
            quantity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{MenuCategory, MenuItemCreate, OrderLineInput, Role};
    use crate::db::repository::UserRepository;

    struct Fixture {
        service: OrderService,
        menu: MenuItemRepository,
        users: UserRepository,
    }

    async fn setup() -> Fixture {
        let db = DbService::new("memory").await.unwrap().db;
        Fixture {
            service: OrderService::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    async fn make_user(f: &Fixture, name: &str, role: Role) -> CurrentUser {
        let email = format!("{}@example.com", name.to_lowercase());
        let user = f
            .users
            .create(name.into(), email.clone(), "a-long-password", role)
            .await
            .unwrap();
        CurrentUser {
            id: user.id.unwrap().to_string(),
            name: name.into(),
            email,
            role,
        }
    }

    async fn make_item(f: &Fixture, name: &str, price: f64) -> String {
        let item = f
            .menu
            .create(MenuItemCreate {
                name: name.into(),
                description: None,
                price,
                category: MenuCategory::MainCourse,
                available: Some(true),
            })
            .await
            .unwrap();
        item.id.unwrap().to_string()
    }

    fn line(id: &str, quantity: i64) -> OrderLineInput {
        OrderLineInput {
            menu_item_id: id.into(),
            quantity,
        }
    }

    #[tokio::test]
    async fn create_prices_and_merges_duplicate_lines() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 12.50).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1), line(&burger, 2)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 3);
        assert_eq!(order.total_price, 37.50);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.version, 0);
    }

    #[tokio::test]
    async fn create_with_unknown_reservation_is_not_found() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 12.50).await;

        let err = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1)],
                    order_type: OrderType::DineIn,
                    reservation_id: Some("reservation:ghost".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_item_merges_and_reprices_at_current_price() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 10.00).await;
        let fries = make_item(&f, "Fries", 4.00).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        // Price change between mutations is reflected in the new total
        f.menu
            .update(
                &burger,
                crate::db::models::MenuItemUpdate {
                    name: None,
                    description: None,
                    price: Some(11.00),
                    category: None,
                    available: None,
                },
            )
            .await
            .unwrap();

        let updated = f
            .service
            .add_item(
                &alice,
                &order_id,
                OrderAddItem {
                    menu_item_id: fries.clone(),
                    quantity: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.total_price, 19.00);
        assert_eq!(updated.version, 1);

        let merged = f
            .service
            .add_item(
                &alice,
                &order_id,
                OrderAddItem {
                    menu_item_id: fries,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
        assert_eq!(merged.items.len(), 2);
        assert_eq!(merged.version, 2);
        assert_eq!(merged.total_price, 23.00);
    }

    #[tokio::test]
    async fn add_item_quantity_overflow_is_rejected() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 10.00).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, i64::MAX)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let err = f
            .service
            .add_item(
                &alice,
                &order_id,
                OrderAddItem {
                    menu_item_id: burger,
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }

    #[tokio::test]
    async fn remove_item_absent_line_is_not_found() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 10.00).await;
        let fries = make_item(&f, "Fries", 4.00).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let err = f
            .service
            .remove_item(
                &alice,
                &order_id,
                OrderRemoveItem {
                    menu_item_id: fries,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let updated = f
            .service
            .remove_item(
                &alice,
                &order_id,
                OrderRemoveItem {
                    menu_item_id: burger,
                },
            )
            .await
            .unwrap();
        assert!(updated.items.is_empty());
        assert_eq!(updated.total_price, 0.0);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_admin_is_not() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let bob = make_user(&f, "Bob", Role::Customer).await;
        let admin = make_user(&f, "Root", Role::Admin).await;
        let burger = make_item(&f, "Burger", 10.00).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let err = f
            .service
            .add_item(
                &bob,
                &order_id,
                OrderAddItem {
                    menu_item_id: burger.clone(),
                    quantity: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let updated = f
            .service
            .add_item(
                &admin,
                &order_id,
                OrderAddItem {
                    menu_item_id: burger,
                    quantity: 1,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn missing_order_is_not_found_before_access_check() {
        let f = setup().await;
        let bob = make_user(&f, "Bob", Role::Customer).await;

        let err = f
            .service
            .delete(&bob, "orders:ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_status_rejects_unknown_status() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 10.00).await;

        let order = f
            .service
            .create(
                &alice,
                OrderCreate {
                    items: vec![line(&burger, 1)],
                    order_type: OrderType::DineIn,
                    reservation_id: None,
                },
            )
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let err = f.service.update_status(&order_id, "done").await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));

        // Flat transitions: completed back to pending is allowed
        f.service
            .update_status(&order_id, "completed")
            .await
            .unwrap();
        let back = f.service.update_status(&order_id, "pending").await.unwrap();
        assert_eq!(back.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn list_all_filters_by_status_and_type() {
        let f = setup().await;
        let alice = make_user(&f, "Alice", Role::Customer).await;
        let burger = make_item(&f, "Burger", 10.00).await;

        for order_type in [OrderType::DineIn, OrderType::PreOrder] {
            f.service
                .create(
                    &alice,
                    OrderCreate {
                        items: vec![line(&burger, 1)],
                        order_type,
                        reservation_id: None,
                    },
                )
                .await
                .unwrap();
        }

        let all = f.service.list_all(None, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let pre = f.service.list_all(None, Some("pre-order")).await.unwrap();
        assert_eq!(pre.len(), 1);
        assert_eq!(pre[0].order_type, OrderType::PreOrder);

        let none = f.service.list_all(Some("cancelled"), None).await.unwrap();
        assert!(none.is_empty());

        let err = f.service.list_all(Some("bogus"), None).await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }
}
