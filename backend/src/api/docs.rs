//! OpenAPI document for the HTTP API.

use axum::Json;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::signup,
        crate::auth::handlers::signin,
        crate::auth::handlers::get_token,
        crate::auth::handlers::create_invite,
    ),
    components(
        schemas(
            crate::auth::models::SignupRequest,
            crate::auth::models::SigninRequest,
            crate::auth::models::TokenResponse,
            crate::auth::models::InviteResponse,
            crate::api::common::ErrorBody,
            crate::api::common::FieldError,
        )
    ),
    tags(
        (name = "Auth", description = "Token based signup, signin and invites")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

/// Serves the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
