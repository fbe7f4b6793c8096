//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Number of lots per catalog page
pub const CATALOG_PAGE_SIZE: u64 = 20;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Sessions & Security
// =============================================================================

/// Default session lifetime in hours (one week)
pub const DEFAULT_SESSION_EXPIRATION_HOURS: i64 = 24 * 7;

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum secret key length (security requirement)
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Seconds per day (for access window calculation)
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "tf_session";

/// Cookie carrying pending notices between a redirect and the next page
pub const FLASH_COOKIE: &str = "tf_flash";

/// How long an unread notice survives, in seconds
pub const FLASH_TTL_SECONDS: i64 = 300;

// =============================================================================
// Bootstrap admin
// =============================================================================

/// Default bootstrap admin email (development only)
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@tenderfinder.com";

/// Default bootstrap admin password (development only)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Database
// =============================================================================

/// Default user store URL (embedded SQLite file)
pub const DEFAULT_USERS_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";

/// Seconds to wait for a tender store connection before giving up
pub const TENDER_ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

// =============================================================================
// Marketplaces
// =============================================================================

/// Marketplace name fragments that place an offer in the China bucket
pub const CN_MARKETPLACES: &[&str] = &["aliexpress", "pinduoduo", "taobao", "1688"];

/// Marketplace name fragments that place an offer in the Kazakhstan bucket
pub const KZ_MARKETPLACES: &[&str] = &["kaspi", "satu", "ozon.kz"];
