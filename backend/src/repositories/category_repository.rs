//! Database repository for expense and income categories.

use crate::database::models::{ExpenseCategory, IncomeCategory};
use anyhow::Result;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, sqlite::SqliteRow};
use uuid::Uuid;

pub struct CategoryRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CategoryRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Inserts one expense category per name in a single statement.
    pub async fn bulk_create_expense_categories(
        &mut self,
        group_id: &str,
        created_by: &str,
        names: &[&str],
    ) -> Result<Vec<ExpenseCategory>> {
        self.bulk_create("expense_categories", group_id, created_by, names)
            .await
    }

    /// Inserts one income category per name in a single statement.
    pub async fn bulk_create_income_categories(
        &mut self,
        group_id: &str,
        created_by: &str,
        names: &[&str],
    ) -> Result<Vec<IncomeCategory>> {
        self.bulk_create("income_categories", group_id, created_by, names)
            .await
    }

    async fn bulk_create<T>(
        &mut self,
        table: &'static str,
        group_id: &str,
        created_by: &str,
        names: &[&str],
    ) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = Utc::now();
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "INSERT INTO {} (id, name, group_id, created_by, created_at) ",
            table
        ));
        builder.push_values(names, |mut row, name| {
            row.push_bind(Uuid::now_v7().to_string())
                .push_bind(name.to_string())
                .push_bind(group_id.to_string())
                .push_bind(created_by.to_string())
                .push_bind(created_at);
        });
        builder.push(" RETURNING id, name, group_id, created_by, created_at");

        let rows = builder
            .build_query_as::<T>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows)
    }
}
