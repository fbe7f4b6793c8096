//! Tender Catalog - a subscription-gated catalog of procurement lots
//!
//! Visitors register, an administrator grants time-limited access, and
//! entitled users browse lots matched with marketplace offers from
//! Kazakhstan, Russia and China.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, entitlements, lots, offers and catalog filters
//! - **services**: Registration, login, administration and catalog queries
//! - **infra**: User store, tender store, repositories and token signing
//! - **api**: HTTP handlers, guards, notices and server-rendered views
//! - **types**: Shared types (pagination)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run user store migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Entitlement, Password, User};
pub use errors::{AppError, AppResult};
