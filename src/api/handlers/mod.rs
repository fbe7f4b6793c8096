//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod catalog_handler;
pub mod home_handler;
pub mod stats_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use catalog_handler::catalog_routes;
pub use home_handler::home_routes;
pub use stats_handler::stats_routes;
