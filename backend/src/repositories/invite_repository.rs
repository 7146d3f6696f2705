//! Database repository for group invites.
//!
//! Invites are one-time: redeeming one deletes its row.

use crate::database::models::Invite;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Repository for invite database operations.
pub struct InviteRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> InviteRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Creates a new invite into `group_id`.
    ///
    /// # Arguments
    /// * `group_id` - Group the invite grants membership of
    /// * `created_by` - User issuing the invite
    /// * `invite_code` - Code the invitee presents at signup
    pub async fn create_invite(
        &mut self,
        group_id: &str,
        created_by: &str,
        invite_code: &str,
    ) -> Result<Invite> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"
            INSERT INTO invites (id, invite_code, group_id, created_by, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, invite_code, group_id, created_by, created_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(invite_code)
        .bind(group_id)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(invite)
    }

    /// Retrieves an invite by its code.
    ///
    /// # Returns
    /// `Some(Invite)` if the code is outstanding, `None` otherwise
    pub async fn get_invite_by_code(&mut self, invite_code: &str) -> Result<Option<Invite>> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"
            SELECT id, invite_code, group_id, created_by, created_at
            FROM invites WHERE invite_code = ?
            "#,
        )
        .bind(invite_code)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(invite)
    }

    /// Deletes an invite.
    ///
    /// # Returns
    /// `true` if this call removed the row, `false` if it was already gone
    pub async fn delete_invite(&mut self, invite_id: &str) -> Result<bool> {
        let rows_affected = sqlx::query("DELETE FROM invites WHERE id = ?")
            .bind(invite_id)
            .execute(&mut *self.conn)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
