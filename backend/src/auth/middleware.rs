//! Middleware for protecting authenticated routes.
//!
//! Bearer tokens arrive in the configured auth header as `<scheme> <token>`.
//! The scheme word is not checked, only the shape of the value.

use crate::api::common::ApiError;
use crate::auth::service::AuthService;
use crate::auth::settings::AuthSettings;
use crate::errors::{ServiceError, ServiceResult};
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Pulls the token out of `header`.
///
/// # Errors
/// `ServiceError::MalformedAuthHeader` when the header is missing, not
/// visible ASCII, or has no second whitespace-separated segment. Anything
/// after the second segment is ignored.
pub fn extract_token(headers: &HeaderMap, header: &HeaderName) -> ServiceResult<String> {
    let value = headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServiceError::MalformedAuthHeader)?;

    value
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or(ServiceError::MalformedAuthHeader)
}

/// Token authentication middleware
///
/// Resolves the bearer token to a `User` and adds it to the request
/// extensions for use in handlers.
pub async fn token_auth(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<Arc<AuthSettings>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers(), &settings.header)?;

    let user = AuthService::new(&pool, &settings.cipher)
        .authenticate(&token)
        .await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
