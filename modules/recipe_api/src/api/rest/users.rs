use std::sync::Arc;

use axum::{
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{CreateUserReq, ObtainTokenReq, TokenDto, UpdateMeReq, UserDto};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{ApiJson, CurrentUser};
use crate::domain::error::DomainError;
use crate::domain::tokens::TokenService;
use crate::domain::users::UserService;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/users/create",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed or email already registered", body = Problem)
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    uri: Uri,
    Extension(svc): Extension<Arc<UserService>>,
    ApiJson(req): ApiJson<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ProblemResponse> {
    info!(email = %req.email, "Creating user");

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Exchange email and password for an API token
#[utoipa::path(
    post,
    path = "/users/token",
    request_body = ObtainTokenReq,
    responses(
        (status = 200, description = "Token issued", body = TokenDto),
        (status = 400, description = "Invalid credentials", body = Problem)
    ),
    tag = "users",
    operation_id = "obtainToken"
)]
pub async fn obtain_token(
    uri: Uri,
    Extension(users): Extension<Arc<UserService>>,
    Extension(tokens): Extension<Arc<TokenService>>,
    ApiJson(req): ApiJson<ObtainTokenReq>,
) -> Result<Json<TokenDto>, ProblemResponse> {
    info!(email = %req.email, "Issuing token");

    let issued = match users.authenticate(&req.email, &req.password).await {
        Ok(Some(user)) => tokens.issue(user.id).await,
        Ok(None) => Err(DomainError::invalid_credentials()),
        Err(e) => Err(e),
    };

    match issued {
        Ok(token) => Ok(Json(TokenDto::from(token))),
        Err(e) => {
            error!("Failed to issue token: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "users",
    operation_id = "getMe"
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserDto> {
    Json(UserDto::from(user))
}

/// Update the authenticated user's name or password
#[utoipa::path(
    patch,
    path = "/users/me",
    request_body = UpdateMeReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "users",
    operation_id = "updateMe"
)]
pub async fn update_me(
    uri: Uri,
    Extension(svc): Extension<Arc<UserService>>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<UpdateMeReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!(user_id = user.id, "Updating profile");

    match svc.update_profile(user.id, req.into()).await {
        Ok(updated) => Ok(Json(UserDto::from(updated))),
        Err(e) => {
            error!("Failed to update profile for user {}: {}", user.id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
