//! Domain layer - Core business entities and logic
//!
//! Accounts and their entitlements, tender lots with matched offers,
//! and the pure rules over them (access checks, country classification,
//! price parsing). Nothing here touches storage or HTTP.

pub mod catalog;
pub mod marketplace;
pub mod password;
pub mod price;
pub mod tender;
pub mod user;

pub use catalog::{CatalogFilter, CountrySelection};
pub use marketplace::{classify, Country};
pub use password::Password;
pub use price::parse_price;
pub use tender::{Lot, LotDetail, LotSummary, Product, ProductsByCountry};
pub use user::{
    normalize_email, AccessDenied, AccessStatus, Entitlement, NewUser, RegisterUser, User,
};
