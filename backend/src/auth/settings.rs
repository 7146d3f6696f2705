//! Injected authentication settings shared by the auth handlers.

use crate::config::Config;
use crate::utils::crypto::TokenCipher;
use anyhow::{Context, Result};
use axum::http::HeaderName;

/// Token cipher and the header bearer tokens arrive in.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub cipher: TokenCipher,
    pub header: HeaderName,
}

impl AuthSettings {
    pub fn new(cipher: TokenCipher, header: HeaderName) -> Self {
        Self { cipher, header }
    }

    /// Builds settings from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cipher = TokenCipher::from_key_str(&config.encryption_key)
            .context("ENCRYPTION_KEY is not a usable key")?;
        let header = HeaderName::from_bytes(config.auth_header.as_bytes())
            .context("AUTH_HEADER is not a valid header name")?;

        Ok(Self::new(cipher, header))
    }
}
