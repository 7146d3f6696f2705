//! Default financial structures seeded into every newly created group.

pub const DEFAULT_CURRENCY_CODE: &str = "RUB";
pub const DEFAULT_CURRENCY_NAME: &str = "Russian ruble";

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Groceries",
    "Cafes and restaurants",
    "Transport",
    "Housing and utilities",
    "Health",
    "Entertainment",
    "Clothing",
    "Other",
];

pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["Salary", "Side income", "Gifts", "Other"];

pub const DEFAULT_WALLETS: &[&str] = &["Cash", "Card"];
