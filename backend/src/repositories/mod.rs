//! Data access layer.
//!
//! Each repository borrows a `SqliteConnection`, so the same code runs on a
//! pooled connection or inside an open transaction.

pub mod category_repository;
pub mod currency_repository;
pub mod group_repository;
pub mod invite_repository;
pub mod user_repository;
pub mod wallet_repository;
