//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits, never on
//! concrete stores.

mod admin_service;
mod auth_service;
mod catalog_service;
pub mod container;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService, DashboardStats};
pub use auth_service::{AuthService, Authenticator};
pub use catalog_service::{CatalogManager, CatalogService, PublicStats};

#[cfg(any(test, feature = "test-utils"))]
pub use admin_service::MockAdminService;
#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_service::MockCatalogService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
