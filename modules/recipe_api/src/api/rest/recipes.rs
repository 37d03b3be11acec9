use std::sync::Arc;

use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{RecipeDetailDto, RecipeSummaryDto, RecipeWriteReq, UpdateRecipeReq};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{ApiJson, CurrentUser};
use crate::domain::recipes::RecipeService;

/// List the authenticated user's recipes, newest first
#[utoipa::path(
    get,
    path = "/recipes/",
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [RecipeSummaryDto]),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "listRecipes"
)]
pub async fn list_recipes(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<RecipeSummaryDto>>, ProblemResponse> {
    info!(user_id = user.id, "Listing recipes");

    match svc.list(user.id).await {
        Ok(recipes) => Ok(Json(
            recipes.into_iter().map(RecipeSummaryDto::from).collect(),
        )),
        Err(e) => {
            error!("Failed to list recipes: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a recipe owned by the authenticated user
#[utoipa::path(
    post,
    path = "/recipes/",
    request_body = RecipeWriteReq,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetailDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "createRecipe"
)]
pub async fn create_recipe(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<RecipeWriteReq>,
) -> Result<(StatusCode, Json<RecipeDetailDto>), ProblemResponse> {
    info!(user_id = user.id, title = %req.title, "Creating recipe");

    match svc.create(user.id, req.into()).await {
        Ok(recipe) => Ok((StatusCode::CREATED, Json(RecipeDetailDto::from(recipe)))),
        Err(e) => {
            error!("Failed to create recipe: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Fetch one of the authenticated user's recipes
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailDto),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Recipe not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "getRecipe"
)]
pub async fn get_recipe(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailDto>, ProblemResponse> {
    info!(user_id = user.id, recipe_id = id, "Getting recipe");

    match svc.get(user.id, id).await {
        Ok(recipe) => Ok(Json(RecipeDetailDto::from(recipe))),
        Err(e) => {
            error!("Failed to get recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Partially update one of the authenticated user's recipes
#[utoipa::path(
    patch,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = UpdateRecipeReq,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Recipe not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "updateRecipe"
)]
pub async fn update_recipe(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateRecipeReq>,
) -> Result<Json<RecipeDetailDto>, ProblemResponse> {
    info!(user_id = user.id, recipe_id = id, "Updating recipe");

    match svc.update_partial(user.id, id, req.into()).await {
        Ok(recipe) => Ok(Json(RecipeDetailDto::from(recipe))),
        Err(e) => {
            error!("Failed to update recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace one of the authenticated user's recipes
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeWriteReq,
    responses(
        (status = 200, description = "Replaced recipe", body = RecipeDetailDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Recipe not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "replaceRecipe"
)]
pub async fn replace_recipe(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<RecipeWriteReq>,
) -> Result<Json<RecipeDetailDto>, ProblemResponse> {
    info!(user_id = user.id, recipe_id = id, "Replacing recipe");

    match svc.replace(user.id, id, req.into()).await {
        Ok(recipe) => Ok(Json(RecipeDetailDto::from(recipe))),
        Err(e) => {
            error!("Failed to replace recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete one of the authenticated user's recipes
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Recipe not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "recipes",
    operation_id = "deleteRecipe"
)]
pub async fn delete_recipe(
    uri: Uri,
    Extension(svc): Extension<Arc<RecipeService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ProblemResponse> {
    info!(user_id = user.id, recipe_id = id, "Deleting recipe");

    match svc.delete(user.id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete recipe {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
