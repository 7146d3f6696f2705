//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::group_service::GroupService;
use crate::utils::crypto::TokenCipher;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Authentication service for signup, signin and bearer token checks
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    cipher: &'a TokenCipher,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, cipher: &'a TokenCipher) -> Self {
        AuthService { pool, cipher }
    }

    /// Registers a new user and returns the plaintext token.
    ///
    /// With an invite code the user joins the inviting group and the invite is
    /// consumed. Without one a new group is created and seeded. Everything runs
    /// in a single transaction, so a failure leaves no user behind.
    pub async fn signup(&self, request: &SignupRequest) -> ServiceResult<TokenResponse> {
        let token = Uuid::new_v4().to_string();
        let token_db = self.cipher.encrypt_token(token.as_bytes())?;

        let mut tx = self.pool.begin().await?;

        let user = UserRepository::new(&mut *tx).create_user(&token_db).await?;
        let token_for_user = self.cipher.decrypt_token(&user.token)?;

        let mut groups = GroupService::new(&mut *tx);
        match request.invite_code() {
            Some(invite_code) => {
                let invite = groups.join_by_invite(&user, invite_code).await?;
                tracing::info!("User {} signed up into group {}", user.id, invite.group_id);
            }
            None => {
                let seeded = groups.bootstrap(&user).await?;
                tracing::info!("User {} signed up with new group {}", user.id, seeded.group.id);
            }
        }

        tx.commit().await?;

        Ok(TokenResponse {
            token: token_for_user,
        })
    }

    /// Checks that the submitted token belongs to a user.
    pub async fn signin(&self, request: &SigninRequest) -> ServiceResult<()> {
        self.ensure_token_exists(&request.token).await
    }

    /// Echoes back a bearer token after confirming it is known.
    pub async fn get_token(&self, token: String) -> ServiceResult<TokenResponse> {
        self.ensure_token_exists(&token).await?;
        Ok(TokenResponse { token })
    }

    /// Resolves a plaintext bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let token_db = self.cipher.encrypt_token(token.as_bytes())?;
        let mut conn = self.pool.acquire().await?;

        UserRepository::new(&mut conn)
            .get_user_by_token(&token_db)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Rejected request with unknown token");
                ServiceError::Unauthorized
            })
    }

    async fn ensure_token_exists(&self, token: &str) -> ServiceResult<()> {
        let token_db = self.cipher.encrypt_token(token.as_bytes())?;
        let mut conn = self.pool.acquire().await?;

        if UserRepository::new(&mut conn).token_exists(&token_db).await? {
            Ok(())
        } else {
            tracing::warn!("Rejected unknown token");
            Err(ServiceError::Unauthorized)
        }
    }
}
