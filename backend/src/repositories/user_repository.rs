//! Database repository for API users.
//!
//! Users are identified by their encrypted bearer token; the plaintext form is
//! never written to the database.

use crate::database::models::User;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

/// Repository for user database operations.
pub struct UserRepository<'c> {
    /// Connection or open transaction the queries run on
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Creates a new user holding the given token ciphertext.
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&mut self, token_ciphertext: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, token, created_at)
            VALUES (?, ?, ?)
            RETURNING id, token, created_at
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(token_ciphertext)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by token ciphertext.
    ///
    /// # Returns
    /// `Some(User)` if a user holds this token, `None` otherwise
    pub async fn get_user_by_token(&mut self, token_ciphertext: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, created_at
            FROM users WHERE token = ?
            "#,
        )
        .bind(token_ciphertext)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    /// Checks whether any user holds the given token ciphertext.
    pub async fn token_exists(&mut self, token_ciphertext: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE token = ?)",
        )
        .bind(token_ciphertext)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(exists)
    }
}
