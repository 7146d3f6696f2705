//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for signup, signin and
//! token lookup, validate input, and hand off to `auth::service` for the
//! core business logic.

use crate::api::common::{ApiError, ApiResult, ErrorBody};
use crate::auth::middleware::extract_token;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::auth::settings::AuthSettings;
use crate::database::models::User;
use crate::services::invite_service::InviteService;
use axum::{
    body::Bytes,
    extract::{Extension, Json, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

/// Handle user signup request
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = TokenResponse),
        (status = 400, description = "Validation error or invalid invite code", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Auth"
)]
#[axum::debug_handler]
pub async fn signup(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<Arc<AuthSettings>>,
    body: Bytes,
) -> ApiResult<(StatusCode, ResponseJson<TokenResponse>)> {
    let payload = parse_signup_body(&body)?;
    payload.validate().map_err(ApiError::from_validation)?;

    let response = AuthService::new(&pool, &settings.cipher)
        .signup(&payload)
        .await?;

    Ok((StatusCode::CREATED, ResponseJson(response)))
}

/// Reads the optional signup payload. An empty body means no invite code.
fn parse_signup_body(body: &[u8]) -> ApiResult<SignupRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SignupRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "invalid_payload",
            format!("Failed to parse the request body as JSON: {}", e),
        )
    })
}

/// Handle user signin request
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Token is valid"),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "No such token exists", body = ErrorBody)
    ),
    tag = "Auth"
)]
#[axum::debug_handler]
pub async fn signin(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<Arc<AuthSettings>>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(payload) = payload?;
    payload.validate().map_err(ApiError::from_validation)?;

    AuthService::new(&pool, &settings.cipher)
        .signin(&payload)
        .await?;

    Ok(StatusCode::OK)
}

/// Return the bearer token presented in the auth header
#[utoipa::path(
    get,
    path = "/api/auth/token",
    responses(
        (status = 200, description = "Token is valid", body = TokenResponse),
        (status = 400, description = "Malformed authorization header", body = ErrorBody),
        (status = 401, description = "No such token exists", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
#[axum::debug_handler]
pub async fn get_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(settings): Extension<Arc<AuthSettings>>,
    headers: HeaderMap,
) -> ApiResult<ResponseJson<TokenResponse>> {
    let token = extract_token(&headers, &settings.header)?;

    let response = AuthService::new(&pool, &settings.cipher)
        .get_token(token)
        .await?;

    Ok(ResponseJson(response))
}

/// Issue a one-time invite into the caller's group
#[utoipa::path(
    post,
    path = "/api/auth/invite",
    responses(
        (status = 201, description = "Invite created", body = InviteResponse),
        (status = 400, description = "Malformed header or caller has no group", body = ErrorBody),
        (status = 401, description = "No such token exists", body = ErrorBody)
    ),
    security(("bearerAuth" = [])),
    tag = "Auth"
)]
#[axum::debug_handler]
pub async fn create_invite(
    Extension(pool): Extension<SqlitePool>,
    Extension(user): Extension<User>,
) -> ApiResult<(StatusCode, ResponseJson<InviteResponse>)> {
    let invite = InviteService::new(&pool).create_invite(&user).await?;

    Ok((
        StatusCode::CREATED,
        ResponseJson(InviteResponse {
            invite_code: invite.invite_code,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::auth::settings::AuthSettings;
    use crate::database::test_pool;
    use crate::utils::crypto::TokenCipher;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{HeaderName, Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
    };
    use serde_json::{Value, json};
    use sqlx::SqlitePool;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup_with_header(header: HeaderName) -> (Router, SqlitePool) {
        let pool = test_pool().await;
        let cipher = TokenCipher::from_key_str("handler-test-key").unwrap();
        let settings = Arc::new(AuthSettings::new(cipher, header));
        (api::router(pool.clone(), settings), pool)
    }

    async fn setup() -> (Router, SqlitePool) {
        setup_with_header(AUTHORIZATION).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn with_auth(method: &str, uri: &str, value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn signup(app: &Router, body: Value) -> String {
        let (status, body) = send(app, post_json("/api/auth/signup", body)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_signup_bootstraps_group() {
        let (app, pool) = setup().await;

        signup(&app, json!({})).await;

        assert_eq!(count(&pool, "users").await, 1);
        assert_eq!(count(&pool, "groups").await, 1);
        assert_eq!(count(&pool, "group_members").await, 1);
        assert_eq!(count(&pool, "currencies").await, 1);
        assert_eq!(count(&pool, "expense_categories").await, 8);
        assert_eq!(count(&pool, "income_categories").await, 4);
        assert_eq!(count(&pool, "wallets").await, 2);

        let stray: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM wallets WHERE group_id NOT IN (SELECT group_id FROM group_members)",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(stray, 0);
    }

    #[tokio::test]
    async fn test_signup_signin_get_token_flow() {
        let (app, _pool) = setup().await;
        let token = signup(&app, json!({})).await;

        let (status, body) = send(&app, post_json("/api/auth/signin", json!({ "token": token }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        // repeated signin is harmless
        let (status, _) = send(&app, post_json("/api/auth/signin", json!({ "token": token }))).await;
        assert_eq!(status, StatusCode::OK);

        let bearer = format!("Bearer {}", token);
        let (status, body) = send(&app, with_auth("GET", "/api/auth/token", Some(&bearer))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "token": token }));
    }

    #[tokio::test]
    async fn test_unknown_token_unauthorized() {
        let (app, _pool) = setup().await;
        signup(&app, json!({})).await;

        for _ in 0..2 {
            let (status, body) = send(&app, post_json("/api/auth/signin", json!({ "token": "wrong" }))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"], "no such token exists");
        }

        let (status, body) = send(&app, with_auth("GET", "/api/auth/token", Some("Bearer wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "no such token exists");
    }

    #[tokio::test]
    async fn test_malformed_auth_header() {
        let (app, _pool) = setup().await;

        for value in [None, Some("Bearer"), Some("")] {
            let (status, body) = send(&app, with_auth("GET", "/api/auth/token", value)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", value);
            assert_eq!(body["error_type"], "malformed_auth_header");
        }
    }

    #[tokio::test]
    async fn test_get_token_ignores_trailing_segments() {
        let (app, _pool) = setup().await;
        let token = signup(&app, json!({})).await;

        let value = format!("Bearer {} extra", token);
        let (status, body) = send(&app, with_auth("GET", "/api/auth/token", Some(&value))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token"], token.as_str());
    }

    #[tokio::test]
    async fn test_signup_without_body() {
        let (app, pool) = setup().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/signup")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].is_string());

        // empty JSON-typed body behaves the same
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/signup")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::CREATED);

        assert_eq!(count(&pool, "users").await, 2);
        assert_eq!(count(&pool, "groups").await, 2);
        assert_eq!(count(&pool, "currencies").await, 1);
        assert_eq!(count(&pool, "expense_categories").await, 16);
        assert_eq!(count(&pool, "income_categories").await, 8);
        assert_eq!(count(&pool, "wallets").await, 4);
    }

    #[tokio::test]
    async fn test_custom_auth_header() {
        let header = HeaderName::from_static("x-auth-token");
        let (app, _pool) = setup_with_header(header.clone()).await;
        let token = signup(&app, json!({})).await;

        let request = Request::builder()
            .uri("/api/auth/token")
            .header(header, format!("Token {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token"], token.as_str());

        let bearer = format!("Bearer {}", token);
        let (status, _) = send(&app, with_auth("GET", "/api/auth/token", Some(&bearer))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invite_flow() {
        let (app, pool) = setup().await;
        let owner = signup(&app, json!({})).await;

        let bearer = format!("Bearer {}", owner);
        let (status, body) = send(&app, with_auth("POST", "/api/auth/invite", Some(&bearer))).await;
        assert_eq!(status, StatusCode::CREATED);
        let code = body["invite_code"].as_str().unwrap().to_string();

        let member = signup(&app, json!({ "invite_code": code })).await;
        assert_ne!(member, owner);

        assert_eq!(count(&pool, "users").await, 2);
        assert_eq!(count(&pool, "groups").await, 1);
        assert_eq!(count(&pool, "group_members").await, 2);
        assert_eq!(count(&pool, "invites").await, 0);
        assert_eq!(count(&pool, "expense_categories").await, 8);
        assert_eq!(count(&pool, "income_categories").await, 4);
        assert_eq!(count(&pool, "wallets").await, 2);

        // the invite is single use and the failed signup leaves no user
        let (status, body) = send(&app, post_json("/api/auth/signup", json!({ "invite_code": code }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "invalid_invite");
        assert_eq!(count(&pool, "users").await, 2);
    }

    #[tokio::test]
    async fn test_invalid_invite_code() {
        let (app, pool) = setup().await;

        let (status, body) = send(&app, post_json("/api/auth/signup", json!({ "invite_code": "nope" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid invite code");
        assert_eq!(count(&pool, "users").await, 0);
    }

    #[tokio::test]
    async fn test_blank_invite_code_starts_new_group() {
        let (app, pool) = setup().await;

        signup(&app, json!({ "invite_code": "  " })).await;
        signup(&app, json!({ "invite_code": null })).await;

        assert_eq!(count(&pool, "groups").await, 2);
        assert_eq!(count(&pool, "currencies").await, 1);
        assert_eq!(count(&pool, "expense_categories").await, 16);
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (app, pool) = setup().await;

        let long_code = "x".repeat(65);
        let (status, body) = send(&app, post_json("/api/auth/signup", json!({ "invite_code": long_code }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "validation_error");
        assert_eq!(body["details"][0]["field"], "invite_code");
        assert_eq!(count(&pool, "users").await, 0);

        let (status, body) = send(&app, post_json("/api/auth/signin", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "token");

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/signin")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "invalid_payload");
    }

    #[tokio::test]
    async fn test_create_invite_requires_token() {
        let (app, _pool) = setup().await;

        let (status, _) = send(&app, with_auth("POST", "/api/auth/invite", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, with_auth("POST", "/api/auth/invite", Some("Bearer wrong"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
