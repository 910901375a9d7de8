//! Order model
//!
//! An order carries denormalized line items (menu item link + quantity)
//! and a server-computed `total_price`. Prices are resolved from the
//! current menu at every mutation; lines never snapshot a price.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

/// Order lifecycle status.
///
/// Transitions are flat: any status may move to any other while the
/// order still exists. Kitchen displays rely on the wire names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// How the order reaches the kitchen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "dine-in")]
    DineIn,
    #[serde(rename = "pre-order")]
    PreOrder,
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::DineIn
    }
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine-in",
            OrderType::PreOrder => "pre-order",
        }
    }
}

impl FromStr for OrderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dine-in" => Ok(OrderType::DineIn),
            "pre-order" => Ok(OrderType::PreOrder),
            _ => Err(()),
        }
    }
}

/// One line of an order: link to a menu item plus quantity.
/// At most one line per menu item; quantities merge on add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: i64,
}

/// Order model matching the `orders` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub reservation: Option<RecordId>,
    pub items: Vec<OrderLine>,
    /// Sum of quantity * current menu price, rounded half-away-from-zero
    /// to two decimals at computation time.
    pub total_price: f64,
    pub order_type: OrderType,
    pub status: OrderStatus,
    /// Bumped on every item mutation; the compare half of compare-and-swap.
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// One requested line in a create payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    #[validate(length(min = 1, message = "menu_item_id is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i64,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<OrderLineInput>,
    #[serde(default)]
    pub order_type: OrderType,
    pub reservation_id: Option<String>,
}

/// Add-item payload; merges into an existing line when present
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderAddItem {
    #[validate(length(min = 1, message = "menu_item_id is required"))]
    pub menu_item_id: String,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i64,
}

/// Remove-item payload; removes the whole line
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderRemoveItem {
    #[validate(length(min = 1, message = "menu_item_id is required"))]
    pub menu_item_id: String,
}

/// Status update payload. Kept as a raw string so an unknown status can
/// answer 400 instead of a serde-level rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}
