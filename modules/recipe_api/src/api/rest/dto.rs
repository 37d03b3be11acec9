use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{
    AuthToken, NewRecipe, NewUser, Recipe, RecipePatch, Tag, User, UserPatch,
};

/// REST DTO for the authenticated user's public profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub email: String,
    pub name: String,
}

/// REST DTO for an issued authentication token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

/// REST DTO for registering a new user
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// REST DTO for exchanging credentials for a token
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ObtainTokenReq {
    pub email: String,
    pub password: String,
}

/// REST DTO for updating the authenticated user's profile (partial)
#[derive(Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateMeReq {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// REST DTO for recipe list entries. Listings stay lean: the
/// description is only present on the detail representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummaryDto {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.99")]
    pub price: Decimal,
    pub link: String,
}

/// REST DTO for a single recipe
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetailDto {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.99")]
    pub price: Decimal,
    pub link: String,
    pub description: String,
}

/// REST DTO for creating or fully replacing a recipe. Unknown payload
/// keys, including any client-supplied owner, are discarded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeWriteReq {
    pub title: String,
    pub time_minutes: i32,
    #[schema(value_type = String, example = "5.99")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

/// REST DTO for updating a recipe (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateRecipeReq {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    #[schema(value_type = Option<String>, example = "5.99")]
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// REST DTO for a tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
}

/// REST DTO for creating a tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTagReq {
    pub name: String,
}

/// REST DTO for renaming a tag
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTagReq {
    pub name: String,
}

// Conversion implementations between REST DTOs and domain models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

impl From<AuthToken> for TokenDto {
    fn from(token: AuthToken) -> Self {
        Self { token: token.key }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
            name: req.name.unwrap_or_default(),
        }
    }
}

impl From<UpdateMeReq> for UserPatch {
    fn from(req: UpdateMeReq) -> Self {
        Self {
            name: req.name,
            password: req.password,
        }
    }
}

impl From<RecipeWriteReq> for NewRecipe {
    fn from(req: RecipeWriteReq) -> Self {
        Self {
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            description: req.description,
            link: req.link,
        }
    }
}

impl From<UpdateRecipeReq> for RecipePatch {
    fn from(req: UpdateRecipeReq) -> Self {
        Self {
            title: req.title,
            time_minutes: req.time_minutes,
            price: req.price,
            description: req.description,
            link: req.link,
        }
    }
}

impl From<Recipe> for RecipeSummaryDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
        }
    }
}

impl From<Recipe> for RecipeDetailDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            description: recipe.description,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}
