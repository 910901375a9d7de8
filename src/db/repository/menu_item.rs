//! Menu item repository

use super::{BaseRepository, RepoError, RepoResult, now_millis, record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Public listing with optional filters, sorted by category then name
    pub async fn list(&self, query: &MenuQuery) -> RepoResult<Vec<MenuItem>> {
        let mut conditions: Vec<&str> = Vec::new();
        if query.category.is_some() {
            conditions.push("category = $category");
        }
        if query.available.is_some() {
            conditions.push("available = $available");
        }
        if query.search.is_some() {
            // Match against name or description, case-insensitively
            conditions.push(
                "(string::contains(string::lowercase(name), $search) \
                OR (description != NONE AND string::contains(string::lowercase(description), $search)))",
            );
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let skip = query.skip.unwrap_or(0).max(0);

        let sql = format!(
            "SELECT * FROM menu_item{} ORDER BY category, name LIMIT $limit START $skip",
            where_clause
        );

        let mut q = self.base.db().query(sql);
        if let Some(ref category) = query.category {
            q = q.bind(("category", category.clone()));
        }
        if let Some(available) = query.available {
            q = q.bind(("available", available));
        }
        if let Some(ref search) = query.search {
            q = q.bind(("search", search.trim().to_lowercase()));
        }
        let mut result = q.bind(("limit", limit)).bind(("skip", skip)).await?;

        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let rid = record_id("menu_item", id)?;
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    /// Find menu item by exact (trimmed) name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let name = name.trim().to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE name = $name LIMIT 1")
            .bind(("name", name))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Batch lookup for pricing. Returns whatever exists; the caller is
    /// responsible for noticing missing ids.
    pub async fn find_many_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE id IN $ids")
            .bind(("ids", ids))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let name = data.name.trim().to_string();

        if self.find_by_name(&name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE menu_item SET
                    name = $name,
                    description = $description,
                    price = $price,
                    category = $category,
                    available = $available,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("description", data.description))
            .bind(("price", data.price))
            .bind(("category", data.category))
            .bind(("available", data.available.unwrap_or(true)))
            .bind(("created_at", now_millis()))
            .await?;

        let created: Option<MenuItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Partial update of a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let rid = record_id("menu_item", id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name {
            let new_name = new_name.trim();
            if new_name != existing.name && self.find_by_name(new_name).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "Menu item '{}' already exists",
                    new_name
                )));
            }
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $rid SET
                    name = $name OR name,
                    description = IF $has_description THEN $description ELSE description END,
                    price = IF $has_price THEN $price ELSE price END,
                    category = IF $has_category THEN $category ELSE category END,
                    available = IF $has_available THEN $available ELSE available END
                RETURN AFTER"#,
            )
            .bind(("rid", rid))
            .bind(("name", data.name.map(|n| n.trim().to_string())))
            .bind(("has_description", data.description.is_some()))
            .bind(("description", data.description))
            .bind(("has_price", data.price.is_some()))
            .bind(("price", data.price))
            .bind(("has_category", data.category.is_some()))
            .bind(("category", data.category))
            .bind(("has_available", data.available.is_some()))
            .bind(("available", data.available))
            .await?;

        result
            .take::<Option<MenuItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id("menu_item", id)?;
        let deleted: Option<MenuItem> = self
            .base
            .db()
            .query("DELETE $rid RETURN BEFORE")
            .bind(("rid", rid))
            .await?
            .take(0)?;

        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }
        Ok(true)
    }
}
