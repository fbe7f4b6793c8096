//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers and route definitions
//! - Access guards and the notice middleware
//! - Custom extractors
//! - Server-rendered views

pub mod cookies;
pub mod extractors;
pub mod flash;
pub mod guards;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod views;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
