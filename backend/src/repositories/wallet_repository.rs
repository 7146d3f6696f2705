//! Database repository for wallets.

use crate::database::models::Wallet;
use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

pub struct WalletRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> WalletRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Inserts one zero-balance wallet per name in a single statement.
    ///
    /// # Arguments
    /// * `group_id` - Group owning the wallets
    /// * `currency_id` - Currency every wallet is held in
    /// * `created_by` - User the wallets are attributed to
    /// * `names` - Wallet names
    pub async fn bulk_create_wallets(
        &mut self,
        group_id: &str,
        currency_id: &str,
        created_by: &str,
        names: &[&str],
    ) -> Result<Vec<Wallet>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = Utc::now();
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO wallets (id, name, balance, group_id, currency_id, created_by, created_at) ",
        );
        builder.push_values(names, |mut row, name| {
            row.push_bind(Uuid::now_v7().to_string())
                .push_bind(name.to_string())
                .push_bind(0_i64)
                .push_bind(group_id.to_string())
                .push_bind(currency_id.to_string())
                .push_bind(created_by.to_string())
                .push_bind(created_at);
        });
        builder.push(
            " RETURNING id, name, balance, group_id, currency_id, created_by, created_at",
        );

        let wallets = builder
            .build_query_as::<Wallet>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(wallets)
    }
}
