//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_EXPIRATION_HOURS, DEFAULT_USERS_DATABASE_URL, MAX_SESSION_EXPIRATION_HOURS,
    MIN_SECRET_KEY_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub users_database_url: String,
    /// Tender store URL; `None` leaves the catalog unconfigured
    pub tender_database_url: Option<String>,
    secret_key: String,
    pub session_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub admin_email: String,
    admin_password: String,
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("users_database_url", &"[REDACTED]")
            .field(
                "tender_database_url",
                &self.tender_database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("secret_key", &"[REDACTED]")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the secret key.
    ///
    /// # Panics
    /// Panics if the secret key is shorter than the minimum length.
    pub fn new(secret_key: impl Into<String>) -> Self {
        let secret_key = secret_key.into();
        if secret_key.len() < MIN_SECRET_KEY_LENGTH {
            panic!(
                "SECRET_KEY must be at least {} characters long",
                MIN_SECRET_KEY_LENGTH
            );
        }

        Self {
            users_database_url: DEFAULT_USERS_DATABASE_URL.to_string(),
            tender_database_url: None,
            secret_key,
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            cookie_secure: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SECRET_KEY is not set in release builds or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("SECRET_KEY not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("SECRET_KEY environment variable must be set in production");
            }
        });

        let mut config = Self::new(secret_key);

        if let Ok(url) = env::var("USERS_DATABASE_URL") {
            config.users_database_url = url;
        }
        config.tender_database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        if let Ok(raw) = env::var("SESSION_EXPIRATION_HOURS") {
            match parse_session_hours(&raw) {
                Some(hours) => config.session_expiration_hours = hours,
                None => tracing::warn!(
                    value = %raw,
                    max = MAX_SESSION_EXPIRATION_HOURS,
                    "SESSION_EXPIRATION_HOURS out of range, using default"
                ),
            }
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Ok(email) = env::var("ADMIN_EMAIL") {
            config.admin_email = email;
        }
        match env::var("ADMIN_PASSWORD") {
            Ok(password) => config.admin_password = password,
            Err(_) if !cfg!(debug_assertions) => {
                tracing::warn!("ADMIN_PASSWORD not set, bootstrap admin uses the default password");
            }
            Err(_) => {}
        }
        config.cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config
    }

    /// Get secret key bytes for session and notice signing.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Password for the bootstrap admin account.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Session lifetime in hours, accepted only within `1..=MAX_SESSION_EXPIRATION_HOURS`.
fn parse_session_hours(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|hours| (1..=MAX_SESSION_EXPIRATION_HOURS).contains(hours))
}
