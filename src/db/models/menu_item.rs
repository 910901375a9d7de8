//! Menu item model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Fixed kitchen categories. Wire strings match the public API
/// ("Main course", not "MainCourse").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuCategory {
    Breakfast,
    #[serde(rename = "Main course")]
    MainCourse,
    Appetizers,
    Salads,
    Soups,
    Desserts,
    Drinks,
    Extras,
}

/// Menu item model matching the `menu_item` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Unique, trimmed
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: MenuCategory,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub available: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description is too long"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    pub category: MenuCategory,
    pub available: Option<bool>,
}

/// Update menu item payload (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description is too long"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: Option<f64>,
    pub category: Option<MenuCategory>,
    pub available: Option<bool>,
}

/// Query params for the public listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub available: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
