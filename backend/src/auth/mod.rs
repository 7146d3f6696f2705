//! Authentication module for token-based user access.
//!
//! This module provides the public interface for signup, signin, bearer token
//! lookup and the middleware guarding authenticated routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod settings;
