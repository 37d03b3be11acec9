//! User account service: registration, credential verification, profile
//! updates.

use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User, UserPatch};
use crate::domain::password::{self, MIN_PASSWORD_LEN};
use crate::infra::storage::mapper::user_from_entity;
use crate::infra::storage::users as store;

#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Normalize an email address: trim surrounding whitespace and
    /// lowercase the domain part after the last `@`. The local part keeps
    /// its case; an address without `@` passes through unchanged.
    pub fn normalize_email(email: &str) -> String {
        let trimmed = email.trim();
        match trimmed.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => trimmed.to_string(),
        }
    }

    fn validate_password(password: &str) -> Result<(), DomainError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        Ok(())
    }

    /// A concurrent registration can slip past the `email_exists` check;
    /// the unique index on email settles the race at insert time.
    fn map_insert_error(e: DbErr, email: &str) -> DomainError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::email_taken(email),
            _ => DomainError::database(e.to_string()),
        }
    }

    #[instrument(name = "users.create_user", skip(self, new_user), fields(email = %new_user.email))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        self.create_with_flags(new_user, false, false).await
    }

    /// Create a user with both staff and superuser flags set.
    #[instrument(name = "users.create_superuser", skip_all, fields(email = %email))]
    pub async fn create_superuser(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let new_user = NewUser {
            email: email.to_string(),
            password: password.to_string(),
            name: String::new(),
        };
        self.create_with_flags(new_user, true, true).await
    }

    async fn create_with_flags(
        &self,
        new_user: NewUser,
        is_staff: bool,
        is_superuser: bool,
    ) -> Result<User, DomainError> {
        let email = Self::normalize_email(&new_user.email);
        if email.is_empty() {
            return Err(DomainError::validation("email", "must not be blank"));
        }
        Self::validate_password(&new_user.password)?;

        if store::email_exists(&self.db, &email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::email_taken(email));
        }

        let password_hash = password::hash_password(&new_user.password)?;
        let entity = store::create(
            &self.db,
            store::NewUserEntity {
                email: email.clone(),
                name: new_user.name,
                password_hash,
                is_staff,
                is_superuser,
            },
        )
        .await
        .map_err(|e| Self::map_insert_error(e, &email))?;

        info!(user_id = entity.id, "Created user");
        Ok(user_from_entity(entity))
    }

    /// Verify credentials. Returns `None` for an unknown email, a wrong
    /// password, or an inactive account; the caller cannot tell which.
    #[instrument(name = "users.authenticate", skip_all, fields(email = %email))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = Self::normalize_email(email);
        let entity = store::find_by_email(&self.db, &email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        let Some(entity) = entity else {
            debug!("Unknown email");
            return Ok(None);
        };
        if !entity.is_active {
            debug!("Account is inactive");
            return Ok(None);
        }
        if !password::verify_password(password, &entity.password_hash) {
            debug!("Password mismatch");
            return Ok(None);
        }
        Ok(Some(user_from_entity(entity)))
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        let entity = store::find_by_id(&self.db, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(user_from_entity(entity))
    }

    /// Apply a partial profile update. A password, when present, is
    /// validated and re-hashed; an empty patch is a no-op.
    #[instrument(name = "users.update_profile", skip(self, patch), fields(user_id = id))]
    pub async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<User, DomainError> {
        if patch.name.is_none() && patch.password.is_none() {
            return self.get_user(id).await;
        }

        let password_hash = match patch.password.as_deref() {
            Some(plain) => {
                Self::validate_password(plain)?;
                Some(password::hash_password(plain)?)
            }
            None => None,
        };

        let entity = store::update(
            &self.db,
            id,
            store::UpdateUserEntity {
                name: patch.name,
                password_hash,
            },
        )
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::user_not_found(id),
            other => DomainError::database(other.to_string()),
        })?;

        info!(user_id = id, "Updated user profile");
        Ok(user_from_entity(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_lowercases_domain_only() {
        let cases = [
            ("test1@EXAMPLE.com", "test1@example.com"),
            ("Test2@Example.com", "Test2@example.com"),
            ("TEST3@EXAMPLE.COM", "TEST3@example.com"),
            ("test4@example.COM", "test4@example.com"),
        ];
        for (raw, expected) in cases {
            assert_eq!(UserService::normalize_email(raw), expected);
        }
    }

    #[test]
    fn normalize_email_without_at_sign_passes_through() {
        assert_eq!(UserService::normalize_email("a"), "a");
        assert_eq!(UserService::normalize_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn normalize_email_trims_whitespace() {
        assert_eq!(
            UserService::normalize_email("  user@EXAMPLE.com  "),
            "user@example.com"
        );
        assert_eq!(UserService::normalize_email("   "), "");
    }

    #[test]
    fn normalize_email_splits_on_last_at_sign() {
        assert_eq!(
            UserService::normalize_email("odd@name@DOMAIN.COM"),
            "odd@name@domain.com"
        );
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(UserService::validate_password("pw").is_err());
        assert!(UserService::validate_password("").is_err());
        assert!(UserService::validate_password("12345").is_ok());
    }

    #[tokio::test]
    async fn insert_collision_maps_to_email_taken() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        crate::infra::storage::migrate(&db).await.unwrap();

        let row = |name: &str| store::NewUserEntity {
            email: "dup@example.com".into(),
            name: name.into(),
            password_hash: "hash".into(),
            is_staff: false,
            is_superuser: false,
        };
        store::create(&db, row("first")).await.unwrap();
        let err = store::create(&db, row("second")).await.unwrap_err();

        let mapped = UserService::map_insert_error(err, "dup@example.com");
        assert!(matches!(mapped, DomainError::EmailTaken { .. }));
    }
}
