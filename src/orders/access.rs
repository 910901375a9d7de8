//! Order access guard
//!
//! Owner-or-admin check shared by every order read and mutation. The
//! guard runs after existence is established, so callers answer 404 for
//! a missing order and 403 for someone else's order, never mixing the
//! two.

use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::utils::{AppError, AppResult};

/// Allow the owner of a record or any admin; reject everyone else.
pub fn ensure_can_access(user: &CurrentUser, owner: &RecordId) -> AppResult<()> {
    if user.is_admin() || owner.to_string() == user.id {
        return Ok(());
    }
    Err(AppError::forbidden(
        "You do not have access to this order",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;

    fn customer(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            name: "Test".into(),
            email: "test@example.com".into(),
            role: Role::Customer,
        }
    }

    #[test]
    fn owner_passes() {
        let owner: RecordId = "user:alice".parse().unwrap();
        assert!(ensure_can_access(&customer("user:alice"), &owner).is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let owner: RecordId = "user:alice".parse().unwrap();
        let err = ensure_can_access(&customer("user:bob"), &owner).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn admin_passes_for_any_owner() {
        let owner: RecordId = "user:alice".parse().unwrap();
        let mut admin = customer("user:root");
        admin.role = Role::Admin;
        assert!(ensure_can_access(&admin, &owner).is_ok());
    }
}
