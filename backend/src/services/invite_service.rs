//! Invite business logic service.
//!
//! Issues one-time invite codes into the caller's group. Redemption happens
//! during signup, see `GroupService::join_by_invite`.

use crate::database::models::{Invite, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::group_repository::GroupRepository;
use crate::repositories::invite_repository::InviteRepository;
use crate::utils::generate_random_string::generate_random_string;
use sqlx::SqlitePool;

pub const INVITE_CODE_LENGTH: usize = 20;

pub struct InviteService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> InviteService<'a> {
    /// Creates a new InviteService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates an invite into the group `user` belongs to.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidOperation` if the user is not a member of
    /// any group.
    pub async fn create_invite(&self, user: &User) -> ServiceResult<Invite> {
        let mut conn = self.pool.acquire().await?;

        let group_id = GroupRepository::new(&mut conn)
            .get_group_id_for_user(&user.id)
            .await?
            .ok_or_else(|| ServiceError::invalid_operation("User does not belong to a group"))?;

        let invite = InviteRepository::new(&mut conn)
            .create_invite(&group_id, &user.id, &generate_random_string(INVITE_CODE_LENGTH))
            .await
            .map_err(|e| {
                // Handle potential database constraint violations
                if e.to_string().contains("UNIQUE constraint failed") {
                    ServiceError::invalid_operation("Invite code collision, please retry")
                } else {
                    ServiceError::Database { source: e }
                }
            })?;

        tracing::info!("User {} created invite {} for group {}", user.id, invite.id, group_id);
        Ok(invite)
    }
}
