use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// User account. The password is only ever held as a salted scrypt hash;
/// the hash never leaves the domain layer through the REST DTOs or
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .field("is_staff", &self.is_staff)
            .field("is_superuser", &self.is_superuser)
            .finish()
    }
}

/// Data for registering a new user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Recipe owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
}

/// Data for creating a recipe. The owner comes from the authenticated
/// caller, never from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub description: String,
    pub link: String,
}

/// Partial recipe update. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.time_minutes.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.link.is_none()
    }
}

/// Owner-scoped label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

/// Opaque authentication token, one per user. The key is a bearer
/// credential and is likewise redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub key: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_debug_redacts_password_hash() {
        let user = User {
            id: 1,
            email: "test@example.com".into(),
            name: "Test Name".into(),
            password_hash: "scrypt$n=16,r=8,p=1$abc123".into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        };
        let out = format!("{user:?}");
        assert!(!out.contains("abc123"));
        assert!(out.contains("<redacted>"));
        assert!(out.contains("test@example.com"));
    }

    #[test]
    fn auth_token_debug_redacts_key() {
        let token = AuthToken {
            key: "super-secret-key".into(),
            user_id: 7,
            created_at: Utc::now(),
        };
        let out = format!("{token:?}");
        assert!(!out.contains("super-secret-key"));
        assert!(out.contains("<redacted>"));
    }
}
