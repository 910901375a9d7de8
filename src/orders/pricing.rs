//! Pricing resolver
//!
//! Totals are always recomputed from the menu's current prices; order
//! lines never carry a price of their own. Arithmetic runs in
//! `rust_decimal` and rounds once, at the end, to two decimals
//! half-away-from-zero.

use rust_decimal::prelude::*;
use std::collections::HashMap;
use surrealdb::RecordId;

use crate::db::models::OrderLine;
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PricingResolver {
    menu_items: MenuItemRepository,
}

impl PricingResolver {
    pub fn new(menu_items: MenuItemRepository) -> Self {
        Self { menu_items }
    }

    /// Compute the total for a set of lines at current menu prices.
    ///
    /// The lookup is all-or-nothing: if any referenced menu item no
    /// longer exists the whole computation fails with 404 naming the
    /// missing ids, and the order is left untouched.
    pub async fn total_for(&self, lines: &[OrderLine]) -> AppResult<f64> {
        if lines.is_empty() {
            return Ok(0.0);
        }

        let ids: Vec<RecordId> = lines.iter().map(|l| l.menu_item.clone()).collect();
        let found = self.menu_items.find_many_by_ids(&ids).await?;

        let price_map: HashMap<String, f64> = found
            .into_iter()
            .filter_map(|item| item.id.map(|id| (id.to_string(), item.price)))
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .map(|id| id.to_string())
            .filter(|id| !price_map.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::not_found(format!(
                "One or more menu items do not exist: {}",
                missing.join(", ")
            )));
        }

        let mut total = Decimal::ZERO;
        for line in lines {
            let unit_price = price_map[&line.menu_item.to_string()];
            let unit = Decimal::from_f64(unit_price).ok_or_else(|| {
                AppError::internal(format!(
                    "Unable to determine price for {}",
                    line.menu_item
                ))
            })?;
            total += unit * Decimal::from(line.quantity);
        }

        let rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .to_f64()
            .ok_or_else(|| AppError::internal("Order total out of range"))
    }
}
