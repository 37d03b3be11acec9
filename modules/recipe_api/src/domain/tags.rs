//! Tag service: owner-scoped labels for organizing recipes.

use sea_orm::{DatabaseConnection, DbErr};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::Tag;
use crate::infra::storage::mapper::tag_from_entity;
use crate::infra::storage::tags as store;

#[derive(Clone)]
pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "Name must not be blank"));
        }
        Ok(())
    }

    /// All tags owned by the user, ordered by name descending.
    #[instrument(name = "tags.list", skip(self))]
    pub async fn list(&self, user_id: i64) -> Result<Vec<Tag>, DomainError> {
        let entities = store::list_for_user(&self.db, user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(entities.into_iter().map(tag_from_entity).collect())
    }

    #[instrument(name = "tags.create", skip(self, name), fields(name = %name))]
    pub async fn create(&self, user_id: i64, name: String) -> Result<Tag, DomainError> {
        Self::validate_name(&name)?;

        let entity = store::create(&self.db, store::NewTagEntity { user_id, name })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(tag_id = entity.id, "Created tag");
        Ok(tag_from_entity(entity))
    }

    #[instrument(name = "tags.rename", skip(self, name))]
    pub async fn rename(&self, user_id: i64, id: i64, name: String) -> Result<Tag, DomainError> {
        store::find_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::TagNotFound { id })?;

        Self::validate_name(&name)?;

        let entity = store::update(&self.db, id, name)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => DomainError::TagNotFound { id },
                other => DomainError::database(other.to_string()),
            })?;
        Ok(tag_from_entity(entity))
    }

    #[instrument(name = "tags.delete", skip(self))]
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), DomainError> {
        let deleted = store::delete_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !deleted {
            return Err(DomainError::TagNotFound { id });
        }
        info!(tag_id = id, "Deleted tag");
        Ok(())
    }
}
