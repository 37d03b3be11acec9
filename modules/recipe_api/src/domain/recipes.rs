//! Recipe service: owner-scoped CRUD over stored recipes.

use sea_orm::{DatabaseConnection, DbErr};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{NewRecipe, Recipe, RecipePatch};
use crate::infra::storage::mapper::recipe_from_entity;
use crate::infra::storage::recipes as store;

#[derive(Clone)]
pub struct RecipeService {
    db: DatabaseConnection,
}

impl RecipeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title must not be blank"));
        }
        Ok(())
    }

    fn validate_time(time_minutes: i32) -> Result<(), DomainError> {
        if time_minutes < 0 {
            return Err(DomainError::validation(
                "time_minutes",
                "Time must not be negative",
            ));
        }
        Ok(())
    }

    /// All recipes owned by the user, newest first.
    #[instrument(name = "recipes.list", skip(self))]
    pub async fn list(&self, user_id: i64) -> Result<Vec<Recipe>, DomainError> {
        let entities = store::list_for_user(&self.db, user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        entities.into_iter().map(recipe_from_entity).collect()
    }

    #[instrument(name = "recipes.create", skip(self, new_recipe), fields(title = %new_recipe.title))]
    pub async fn create(&self, user_id: i64, new_recipe: NewRecipe) -> Result<Recipe, DomainError> {
        Self::validate_title(&new_recipe.title)?;
        Self::validate_time(new_recipe.time_minutes)?;

        let entity = store::create(
            &self.db,
            store::NewRecipeEntity {
                user_id,
                title: new_recipe.title,
                time_minutes: new_recipe.time_minutes,
                price: new_recipe.price.to_string(),
                description: new_recipe.description,
                link: new_recipe.link,
            },
        )
        .await
        .map_err(|e| DomainError::database(e.to_string()))?;

        info!(recipe_id = entity.id, "Created recipe");
        recipe_from_entity(entity)
    }

    /// Fetch one recipe; recipes of other users are reported as missing.
    #[instrument(name = "recipes.get", skip(self))]
    pub async fn get(&self, user_id: i64, id: i64) -> Result<Recipe, DomainError> {
        let entity = store::find_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::RecipeNotFound { id })?;
        recipe_from_entity(entity)
    }

    #[instrument(name = "recipes.update", skip(self, patch))]
    pub async fn update_partial(
        &self,
        user_id: i64,
        id: i64,
        patch: RecipePatch,
    ) -> Result<Recipe, DomainError> {
        let current = store::find_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::RecipeNotFound { id })?;

        if patch.is_empty() {
            return recipe_from_entity(current);
        }
        if let Some(title) = &patch.title {
            Self::validate_title(title)?;
        }
        if let Some(time_minutes) = patch.time_minutes {
            Self::validate_time(time_minutes)?;
        }

        let entity = store::update(
            &self.db,
            id,
            store::UpdateRecipeEntity {
                title: patch.title,
                time_minutes: patch.time_minutes,
                price: patch.price.map(|p| p.to_string()),
                description: patch.description,
                link: patch.link,
            },
        )
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::RecipeNotFound { id },
            other => DomainError::database(other.to_string()),
        })?;
        recipe_from_entity(entity)
    }

    /// Full replacement: every non-owner field is overwritten.
    #[instrument(name = "recipes.replace", skip(self, new_recipe))]
    pub async fn replace(
        &self,
        user_id: i64,
        id: i64,
        new_recipe: NewRecipe,
    ) -> Result<Recipe, DomainError> {
        store::find_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::RecipeNotFound { id })?;

        Self::validate_title(&new_recipe.title)?;
        Self::validate_time(new_recipe.time_minutes)?;

        let entity = store::update(
            &self.db,
            id,
            store::UpdateRecipeEntity {
                title: Some(new_recipe.title),
                time_minutes: Some(new_recipe.time_minutes),
                price: Some(new_recipe.price.to_string()),
                description: Some(new_recipe.description),
                link: Some(new_recipe.link),
            },
        )
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::RecipeNotFound { id },
            other => DomainError::database(other.to_string()),
        })?;
        recipe_from_entity(entity)
    }

    #[instrument(name = "recipes.delete", skip(self))]
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), DomainError> {
        let deleted = store::delete_owned(&self.db, user_id, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !deleted {
            return Err(DomainError::RecipeNotFound { id });
        }
        info!(recipe_id = id, "Deleted recipe");
        Ok(())
    }
}
