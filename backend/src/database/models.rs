//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// An API user. `token` holds the ciphertext form only.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Group {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// One-time code granting membership of `group_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Invite {
    pub id: String,
    pub invite_code: String,
    pub group_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Currency {
    pub id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub group_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IncomeCategory {
    pub id: String,
    pub name: String,
    pub group_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Balance container scoped to a group. `balance` is in minor currency units.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub group_id: String,
    pub currency_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Everything seeded for a freshly created group.
#[derive(Debug, Serialize)]
pub struct GroupBootstrap {
    pub group: Group,
    pub currency: Currency,
    pub expense_categories: Vec<ExpenseCategory>,
    pub income_categories: Vec<IncomeCategory>,
    pub wallets: Vec<Wallet>,
}
