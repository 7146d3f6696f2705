//! Collection of general utility functions.
//!
//! This module serves as a home for small, reusable helpers that do not fit
//! into other specific domain modules.

pub mod crypto;
pub mod generate_random_string;
