use std::sync::Arc;

use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{CreateTagReq, TagDto, UpdateTagReq};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::{ApiJson, CurrentUser};
use crate::domain::tags::TagService;

/// List the authenticated user's tags
#[utoipa::path(
    get,
    path = "/tags/",
    responses(
        (status = 200, description = "Tags owned by the caller", body = [TagDto]),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "tags",
    operation_id = "listTags"
)]
pub async fn list_tags(
    uri: Uri,
    Extension(svc): Extension<Arc<TagService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TagDto>>, ProblemResponse> {
    info!(user_id = user.id, "Listing tags");

    match svc.list(user.id).await {
        Ok(tags) => Ok(Json(tags.into_iter().map(TagDto::from).collect())),
        Err(e) => {
            error!("Failed to list tags: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a tag owned by the authenticated user
#[utoipa::path(
    post,
    path = "/tags/",
    request_body = CreateTagReq,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem)
    ),
    security(("token" = [])),
    tag = "tags",
    operation_id = "createTag"
)]
pub async fn create_tag(
    uri: Uri,
    Extension(svc): Extension<Arc<TagService>>,
    CurrentUser(user): CurrentUser,
    ApiJson(req): ApiJson<CreateTagReq>,
) -> Result<(StatusCode, Json<TagDto>), ProblemResponse> {
    info!(user_id = user.id, name = %req.name, "Creating tag");

    match svc.create(user.id, req.name).await {
        Ok(tag) => Ok((StatusCode::CREATED, Json(TagDto::from(tag)))),
        Err(e) => {
            error!("Failed to create tag: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Rename one of the authenticated user's tags
#[utoipa::path(
    patch,
    path = "/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = UpdateTagReq,
    responses(
        (status = 200, description = "Renamed tag", body = TagDto),
        (status = 400, description = "Validation failed", body = Problem),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Tag not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "tags",
    operation_id = "renameTag"
)]
pub async fn rename_tag(
    uri: Uri,
    Extension(svc): Extension<Arc<TagService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateTagReq>,
) -> Result<Json<TagDto>, ProblemResponse> {
    info!(user_id = user.id, tag_id = id, "Renaming tag");

    match svc.rename(user.id, id, req.name).await {
        Ok(tag) => Ok(Json(TagDto::from(tag))),
        Err(e) => {
            error!("Failed to rename tag {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete one of the authenticated user's tags
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "Tag not found", body = Problem)
    ),
    security(("token" = [])),
    tag = "tags",
    operation_id = "deleteTag"
)]
pub async fn delete_tag(
    uri: Uri,
    Extension(svc): Extension<Arc<TagService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ProblemResponse> {
    info!(user_id = user.id, tag_id = id, "Deleting tag");

    match svc.delete(user.id, id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete tag {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
