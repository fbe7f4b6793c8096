//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over the user and tender stores
//! - Token signing for cookies

pub mod db;
pub mod repositories;
pub mod signer;

pub use db::{Database, Migrator, TenderDatabase};
pub use repositories::{
    CustomerCounts, TenderRepository, TenderStore, TenderTotals, UserRepository, UserStore,
};
pub use signer::{SessionClaims, TokenSigner};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockTenderRepository, MockUserRepository};
