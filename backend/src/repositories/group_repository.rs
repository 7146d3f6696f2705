//! Database repository for groups and their memberships.

use crate::database::models::Group;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

pub struct GroupRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> GroupRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Creates an empty group.
    pub async fn create_group(&mut self) -> Result<Group> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (id, created_at)
            VALUES (?, ?)
            RETURNING id, created_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(group)
    }

    /// Adds a user to a group. Fails if the user already belongs to one.
    pub async fn add_member(&mut self, group_id: &str, user_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO group_members (user_id, group_id, joined_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    /// Returns the group the user belongs to, if any.
    pub async fn get_group_id_for_user(&mut self, user_id: &str) -> Result<Option<String>> {
        let group_id = sqlx::query_scalar::<_, String>(
            "SELECT group_id FROM group_members WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(group_id)
    }
}
