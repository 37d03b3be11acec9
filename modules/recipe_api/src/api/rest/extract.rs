//! Request extractors: token authentication and JSON body handling.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::{header, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::api::problem::ProblemResponse;
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::domain::error::DomainError;
use crate::domain::model::User;
use crate::domain::tokens::TokenService;

/// The authenticated user, resolved from the `Authorization: Token <key>`
/// header. Handlers take `CurrentUser(user)` as an argument; requests
/// without a usable token are rejected with a 401 problem.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();

        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("TokenService extension is not installed");
                map_domain_error(
                    &DomainError::internal("Token service unavailable"),
                    &path,
                )
            })?;

        let key = bearer_key(parts)
            .ok_or_else(|| map_domain_error(&DomainError::invalid_token(), &path))?;

        let user = tokens
            .resolve(&key)
            .await
            .map_err(|e| map_domain_error(&e, &path))?;
        Ok(CurrentUser(user))
    }
}

/// Pull the opaque key out of the Authorization header. The scheme
/// keyword is matched case-insensitively.
fn bearer_key(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .trim();
    let (scheme, key) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("token") {
        return None;
    }
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(key.to_owned())
}

/// JSON extractor whose rejections render as RFC 9457 problems with
/// status 400 instead of axum's default plain-text 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonError))]
pub struct ApiJson<T>(pub T);

pub struct JsonError(ProblemResponse);

impl From<JsonRejection> for JsonError {
    fn from(rejection: JsonRejection) -> Self {
        let problem = from_parts(
            StatusCode::BAD_REQUEST,
            "MALFORMED_BODY",
            "Malformed request body",
            rejection.body_text(),
            "",
        );
        Self(problem)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .uri("/recipes/")
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn bearer_key_accepts_token_scheme() {
        let parts = parts_with_auth("Token abc123");
        assert_eq!(bearer_key(&parts).as_deref(), Some("abc123"));
    }

    #[test]
    fn bearer_key_scheme_is_case_insensitive() {
        let parts = parts_with_auth("token abc123");
        assert_eq!(bearer_key(&parts).as_deref(), Some("abc123"));
    }

    #[test]
    fn bearer_key_rejects_other_schemes_and_blank_keys() {
        assert!(bearer_key(&parts_with_auth("Bearer abc123")).is_none());
        assert!(bearer_key(&parts_with_auth("Token ")).is_none());
        assert!(bearer_key(&parts_with_auth("abc123")).is_none());
    }
}
