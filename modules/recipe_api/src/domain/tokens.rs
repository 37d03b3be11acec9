//! Opaque authentication tokens, persisted one-per-user.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use scrypt::password_hash::rand_core::{OsRng, RngCore};
use sea_orm::{DatabaseConnection, SqlErr};
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{AuthToken, User};
use crate::infra::storage::mapper::{token_from_entity, user_from_entity};
use crate::infra::storage::{tokens as store, users as user_store};

const TOKEN_KEY_BYTES: usize = 32;

#[derive(Clone)]
pub struct TokenService {
    db: DatabaseConnection,
}

impl TokenService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 32 OS-random bytes, URL-safe base64 without padding.
    fn generate_key() -> String {
        let mut bytes = [0u8; TOKEN_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Return the user's token, creating one on first request. Repeated
    /// calls hand back the same key.
    #[instrument(name = "tokens.issue", skip(self))]
    pub async fn issue(&self, user_id: i64) -> Result<AuthToken, DomainError> {
        if let Some(existing) = store::find_by_user(&self.db, user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            debug!("Reusing existing token");
            return Ok(token_from_entity(existing));
        }

        let created = store::create(
            &self.db,
            store::NewTokenEntity {
                key: Self::generate_key(),
                user_id,
                created_at: Utc::now(),
            },
        )
        .await;

        match created {
            Ok(entity) => {
                info!(user_id, "Issued new token");
                Ok(token_from_entity(entity))
            }
            // Concurrent first issues race on the one-token-per-user
            // constraint; hand the loser the token that won.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let existing = store::find_by_user(&self.db, user_id)
                    .await
                    .map_err(|e| DomainError::database(e.to_string()))?
                    .ok_or_else(|| DomainError::database("Token missing after insert conflict"))?;
                Ok(token_from_entity(existing))
            }
            Err(e) => Err(DomainError::database(e.to_string())),
        }
    }

    /// Resolve an opaque key back to its user. Unknown keys, dangling
    /// tokens, and inactive accounts all fail the same way.
    #[instrument(name = "tokens.resolve", skip_all)]
    pub async fn resolve(&self, key: &str) -> Result<User, DomainError> {
        if key.is_empty() {
            return Err(DomainError::invalid_token());
        }

        let token = store::find_by_key(&self.db, key)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(DomainError::invalid_token)?;

        let user = user_store::find_by_id(&self.db, token.user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(DomainError::invalid_token)?;

        if !user.is_active {
            debug!(user_id = user.id, "Token belongs to an inactive account");
            return Err(DomainError::invalid_token());
        }
        Ok(user_from_entity(user))
    }
}
