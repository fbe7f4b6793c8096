//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! `users` lives in the user store; `lots` and `search_results` in the
//! tender store, which this service only reads.

pub mod lot;
pub mod search_result;
pub mod user;
