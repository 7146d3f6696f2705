//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle signup, signin, token lookup and invite issuing.
//! They are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/token", get(get_token))
        .route(
            "/invite",
            post(create_invite).layer(middleware::from_fn(token_auth)),
        )
}
