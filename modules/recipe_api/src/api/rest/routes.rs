//! Router assembly: routes, per-request service injection, request id
//! plumbing, and the shared middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{header, HeaderName, HeaderValue, StatusCode, Uri};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{field::Empty, info_span, Span};
use utoipa::OpenApi;

use crate::api::problem::ProblemResponse;
use crate::api::rest::error::from_parts;
use crate::api::rest::{recipes, tags, users, web};
use crate::domain::recipes::RecipeService;
use crate::domain::tags::TagService;
use crate::domain::tokens::TokenService;
use crate::domain::users::UserService;

/// All domain services the handlers need, injected as request extensions.
#[derive(Clone)]
pub struct ApiServices {
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub recipes: Arc<RecipeService>,
    pub tags: Arc<TagService>,
}

impl ApiServices {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserService::new(db.clone())),
            tokens: Arc::new(TokenService::new(db.clone())),
            recipes: Arc::new(RecipeService::new(db.clone())),
            tags: Arc::new(TagService::new(db.clone())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RouterOptions {
    pub enable_docs: bool,
    pub cors_enabled: bool,
    pub timeout_sec: u64,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            enable_docs: false,
            cors_enabled: false,
            timeout_sec: 30,
        }
    }
}

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request id exposed to handlers as a typed extension, so they never
/// have to reach into raw headers.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Mints an id for requests that arrive without an x-request-id header.
#[derive(Clone, Copy, Default)]
pub struct RequestIdMaker;

impl MakeRequestId for RequestIdMaker {
    fn make_request_id<B>(
        &mut self,
        _request: &Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let value = HeaderValue::try_from(nanoid::nanoid!()).ok()?;
        Some(tower_http::request_id::RequestId::new(value))
    }
}

/// Copies the x-request-id header into a [`RequestId`] extension.
pub async fn attach_request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("n/a")
        .to_owned();
    request.extensions_mut().insert(RequestId(id));
    next.run(request).await
}

/// Build the complete application router.
pub fn router(services: &ApiServices, options: &RouterOptions) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .route("/health", get(web::health_check))
        .route(
            "/users/create",
            post(users::create_user).fallback(method_not_allowed),
        )
        .route(
            "/users/token",
            post(users::obtain_token).fallback(method_not_allowed),
        )
        .route(
            "/users/me",
            get(users::get_me)
                .patch(users::update_me)
                .fallback(method_not_allowed),
        )
        .route(
            "/recipes/",
            get(recipes::list_recipes)
                .post(recipes::create_recipe)
                .fallback(method_not_allowed),
        )
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .put(recipes::replace_recipe)
                .delete(recipes::delete_recipe)
                .fallback(method_not_allowed),
        )
        .route(
            "/tags/",
            get(tags::list_tags)
                .post(tags::create_tag)
                .fallback(method_not_allowed),
        )
        .route(
            "/tags/{id}",
            axum::routing::patch(tags::rename_tag)
                .delete(tags::delete_tag)
                .fallback(method_not_allowed),
        )
        .fallback(not_found);

    if options.enable_docs {
        // Build once, serve as static JSON (no per-request parsing)
        let openapi_value = Arc::new(serde_json::to_value(web::ApiDoc::openapi())?);
        router = router
            .route(
                "/openapi.json",
                get({
                    let v = openapi_value.clone();
                    move || async move {
                        let json = axum::Json((*v).clone());
                        ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                    }
                }),
            )
            .route("/docs", get(web::serve_docs));
    }

    router = router
        .layer(Extension(services.users.clone()))
        .layer(Extension(services.tokens.clone()))
        .layer(Extension(services.recipes.clone()))
        .layer(Extension(services.tags.clone()));

    // Layers wrap bottom-up: each .layer() call goes outside the previous
    // one, so the body limit is outermost and requests reach the id layers
    // last. A client-supplied x-request-id is visible to the trace span and
    // the extension; a generated one is only guaranteed on the response.
    router = router
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, RequestIdMaker))
        .layer(from_fn(attach_request_id))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("n/a");
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record("latency_ms", latency.as_millis() as u64);
                }),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(options.timeout_sec)));

    if options.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router = router.layer(RequestBodyLimitLayer::new(16 * 1024 * 1024));

    Ok(router)
}

async fn method_not_allowed(uri: Uri) -> ProblemResponse {
    from_parts(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "Method Not Allowed",
        format!("The requested method is not supported for {}", uri.path()),
        uri.path(),
    )
}

async fn not_found(uri: Uri) -> ProblemResponse {
    from_parts(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        "Not Found",
        format!("No route matches {}", uri.path()),
        uri.path(),
    )
}
