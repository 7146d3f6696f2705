//! Central module for organizing the application's HTTP API.
//!
//! Assembles the auth routes, the root endpoint and the OpenAPI document into
//! a single router and attaches the shared pool and auth settings.

pub mod common;
pub mod docs;

use crate::api::common::ApiResponse;
use crate::auth::routes::auth_router;
use crate::auth::settings::AuthSettings;
use axum::{Extension, Json, Router, routing::get};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceBuilder;

/// Builds the application router.
pub fn router(pool: SqlitePool, settings: Arc<AuthSettings>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/schema", get(docs::openapi_json))
        .nest("/api/auth", auth_router())
        .layer(
            ServiceBuilder::new()
                .layer(Extension(pool))
                .layer(Extension(settings)),
        )
}

async fn root_handler() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        json!({
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
        "Moneybox auth API is running",
    ))
}
