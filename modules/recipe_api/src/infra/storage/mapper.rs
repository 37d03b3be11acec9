use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::error::DomainError;
use crate::domain::model::{AuthToken, Recipe, Tag, User};
use crate::infra::storage::recipes::Model as RecipeEntity;
use crate::infra::storage::tags::Model as TagEntity;
use crate::infra::storage::tokens::Model as TokenEntity;
use crate::infra::storage::users::Model as UserEntity;

/// Convert a user row to a domain model
pub fn user_from_entity(entity: UserEntity) -> User {
    User {
        id: entity.id,
        email: entity.email,
        name: entity.name,
        password_hash: entity.password_hash,
        is_active: entity.is_active,
        is_staff: entity.is_staff,
        is_superuser: entity.is_superuser,
    }
}

/// Convert a token row to a domain model
pub fn token_from_entity(entity: TokenEntity) -> AuthToken {
    AuthToken {
        key: entity.key,
        user_id: entity.user_id,
        created_at: entity.created_at,
    }
}

/// Convert a recipe row to a domain model. Fails only if the stored
/// price column holds something that is not a decimal.
pub fn recipe_from_entity(entity: RecipeEntity) -> Result<Recipe, DomainError> {
    let price = Decimal::from_str(&entity.price).map_err(|e| {
        DomainError::internal(format!(
            "Recipe {} has a malformed price {:?}: {e}",
            entity.id, entity.price
        ))
    })?;

    Ok(Recipe {
        id: entity.id,
        user_id: entity.user_id,
        title: entity.title,
        time_minutes: entity.time_minutes,
        price,
        description: entity.description,
        link: entity.link,
    })
}

/// Convert a tag row to a domain model
pub fn tag_from_entity(entity: TagEntity) -> Tag {
    Tag {
        id: entity.id,
        user_id: entity.user_id,
        name: entity.name,
    }
}
