//! User account, entitlement and registration input.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::SECONDS_PER_DAY;
use crate::errors::{AppError, AppResult};

/// Why an entitlement does not currently open the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// `has_access` is off; the expiry is irrelevant
    NoAccess,
    /// `has_access` is on but the window closed
    Expired,
}

/// A user's catalog entitlement: the access flag plus an optional expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entitlement {
    pub has_access: bool,
    pub access_until: Option<DateTime<Utc>>,
}

impl Entitlement {
    /// Entitlement opening the catalog for `days` days from `now`.
    ///
    /// # Errors
    /// Returns a validation error when the expiry falls outside the
    /// representable date range.
    pub fn granted_for(days: i64, now: DateTime<Utc>) -> AppResult<Self> {
        let until = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(Duration::try_seconds)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| AppError::validation("Invalid number of days"))?;

        Ok(Self {
            has_access: true,
            access_until: Some(until),
        })
    }

    /// Entitlement with access switched off and no expiry.
    pub fn revoked() -> Self {
        Self::default()
    }

    /// Check whether the entitlement opens the catalog at `now`.
    ///
    /// An expiry equal to `now` still counts as open.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), AccessDenied> {
        if !self.has_access {
            return Err(AccessDenied::NoAccess);
        }
        match self.access_until {
            Some(until) if until < now => Err(AccessDenied::Expired),
            _ => Ok(()),
        }
    }

    /// Shorthand for `check(now).is_ok()`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.check(now).is_ok()
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub entitlement: Entitlement,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Check whether the user may open the catalog at `now`
    pub fn check_access(&self, now: DateTime<Utc>) -> Result<(), AccessDenied> {
        self.entitlement.check(now)
    }
}

/// Data needed to insert a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub has_access: bool,
}

/// Registration form input
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
    #[serde(default)]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

/// Normalize an email for storage and lookup.
///
/// Emails compare case-insensitively, so they are stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Access state of an account as shown to administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    None,
    Active { until: Option<DateTime<Utc>> },
    Expired { at: DateTime<Utc> },
}

impl AccessStatus {
    pub fn of(entitlement: &Entitlement, now: DateTime<Utc>) -> Self {
        match entitlement.check(now) {
            Ok(()) => AccessStatus::Active {
                until: entitlement.access_until,
            },
            Err(AccessDenied::NoAccess) => AccessStatus::None,
            Err(AccessDenied::Expired) => AccessStatus::Expired {
                // Expired implies an expiry is set
                at: entitlement.access_until.unwrap_or(now),
            },
        }
    }
}
