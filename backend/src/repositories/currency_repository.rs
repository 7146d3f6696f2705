//! Database repository for currencies.

use crate::database::models::Currency;
use anyhow::Result;
use sqlx::SqliteConnection;
use uuid::Uuid;

pub struct CurrencyRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CurrencyRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Returns the currency with `code`, creating it first if needed.
    ///
    /// An existing row keeps its stored name.
    pub async fn get_or_create(&mut self, code: &str, name: &str) -> Result<Currency> {
        sqlx::query(
            r#"
            INSERT INTO currencies (id, code, name)
            VALUES (?, ?, ?)
            ON CONFLICT(code) DO NOTHING
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(code)
        .bind(name)
        .execute(&mut *self.conn)
        .await?;

        let currency = sqlx::query_as::<_, Currency>(
            "SELECT id, code, name FROM currencies WHERE code = ?",
        )
        .bind(code)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(currency)
    }
}
