//! Data structures for authentication requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Signup request payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    /// Code of an outstanding invite; omit to start a new group
    #[serde(default)]
    #[validate(length(max = 64, message = "Invite code must be at most 64 characters"))]
    pub invite_code: Option<String>,
}

impl SignupRequest {
    /// The invite code to redeem. Blank codes count as no code.
    pub fn invite_code(&self) -> Option<&str> {
        self.invite_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

/// Signin request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Plaintext bearer token handed back to the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Freshly issued invite code
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteResponse {
    pub invite_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_invite_code_ignored() {
        let request = SignupRequest {
            invite_code: Some("   ".to_string()),
        };
        assert_eq!(request.invite_code(), None);

        let request = SignupRequest {
            invite_code: Some(" ABC ".to_string()),
        };
        assert_eq!(request.invite_code(), Some("ABC"));

        assert_eq!(SignupRequest::default().invite_code(), None);
    }

    #[test]
    fn test_signup_validation() {
        let request: SignupRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());

        let request = SignupRequest {
            invite_code: Some("x".repeat(65)),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("invite_code"));
    }

    #[test]
    fn test_signin_requires_token() {
        let request: SigninRequest = serde_json::from_str("{}").unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("token"));
    }
}
