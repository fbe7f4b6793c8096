//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence, one per
//! store: accounts live in the user store, lots and offers in the
//! read-only tender store.

pub mod catalog_query;
pub(crate) mod entities;
mod tender_repository;
mod user_repository;

pub use catalog_query::{CatalogQuery, LotPredicate};
pub use tender_repository::{TenderRepository, TenderStore, TenderTotals};
pub use user_repository::{CustomerCounts, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use tender_repository::MockTenderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
