use axum::response::{Html, Json};
use serde_json::{json, Value};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::problem::{Problem, ValidationError};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn serve_docs() -> Html<&'static str> {
    // Load Stoplight Elements from CDN @latest
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Recipe Box API Docs</title>
  <script src="https://unpkg.com/@stoplight/elements@latest/web-components.min.js"></script>
  <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements@latest/styles.min.css">
</head>
<body>
  <elements-api apiDescriptionUrl="/openapi.json" router="hash" layout="sidebar"></elements-api>
</body>
</html>"#,
    )
}

/// Registers the opaque token scheme carried in the Authorization header.
struct TokenSecurityAddon;

impl Modify for TokenSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Opaque API token, sent as 'Token <key>'. Obtain one via POST /users/token.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&TokenSecurityAddon),
    info(
        title = "Recipe Box API",
        description = "User accounts and recipe management over REST.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    paths(
        crate::api::rest::users::create_user,
        crate::api::rest::users::obtain_token,
        crate::api::rest::users::get_me,
        crate::api::rest::users::update_me,
        crate::api::rest::recipes::list_recipes,
        crate::api::rest::recipes::create_recipe,
        crate::api::rest::recipes::get_recipe,
        crate::api::rest::recipes::update_recipe,
        crate::api::rest::recipes::replace_recipe,
        crate::api::rest::recipes::delete_recipe,
        crate::api::rest::tags::list_tags,
        crate::api::rest::tags::create_tag,
        crate::api::rest::tags::rename_tag,
        crate::api::rest::tags::delete_tag,
    ),
    components(schemas(Problem, ValidationError)),
    tags(
        (name = "users", description = "Registration, authentication and profile"),
        (name = "recipes", description = "Owner-scoped recipe management"),
        (name = "tags", description = "Owner-scoped tag management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_includes_all_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/users/create"));
        assert!(paths.contains_key("/users/token"));
        assert!(paths.contains_key("/users/me"));
        assert!(paths.contains_key("/recipes/"));
        assert!(paths.contains_key("/recipes/{id}"));
        assert!(paths.contains_key("/tags/"));
        assert!(paths.contains_key("/tags/{id}"));
    }

    #[test]
    fn openapi_document_registers_token_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("token"));
    }
}
