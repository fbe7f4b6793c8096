//! Capability checks called at the top of protected handlers.
//!
//! Each guard takes the resolved user (if any) and returns either the user
//! or a [`Denial`] that renders as a redirect with a notice.

use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use super::flash::{FlashRedirect, Notice};
use crate::domain::{AccessDenied, User};

/// Why a guard refused the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotLoggedIn,
    NotAdmin,
    NoAccess,
    AccessExpired,
}

/// A refused request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial(pub DenyReason);

impl Denial {
    pub fn reason(&self) -> DenyReason {
        self.0
    }

    /// Where the user is sent
    pub fn location(&self) -> &'static str {
        match self.0 {
            DenyReason::NotLoggedIn => "/login",
            DenyReason::NotAdmin | DenyReason::NoAccess | DenyReason::AccessExpired => "/",
        }
    }

    pub fn notice(&self) -> Notice {
        match self.0 {
            DenyReason::NotLoggedIn => Notice::warning("Please log in to access this page"),
            DenyReason::NotAdmin => Notice::danger("Administrator access required"),
            DenyReason::NoAccess => {
                Notice::warning("You do not have access to the catalog. Please contact an administrator")
            }
            DenyReason::AccessExpired => {
                Notice::warning("Your catalog access has expired. Please contact an administrator")
            }
        }
    }
}

impl From<AccessDenied> for Denial {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::NoAccess => Denial(DenyReason::NoAccess),
            AccessDenied::Expired => Denial(DenyReason::AccessExpired),
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        tracing::debug!(reason = ?self.0, "Request denied");
        FlashRedirect::new(self.location(), self.notice()).into_response()
    }
}

pub fn require_login(user: Option<&User>) -> Result<&User, Denial> {
    user.ok_or(Denial(DenyReason::NotLoggedIn))
}

/// Anonymous visitors are treated like non-admins.
pub fn require_admin(user: Option<&User>) -> Result<&User, Denial> {
    match user {
        Some(user) if user.is_admin() => Ok(user),
        _ => Err(Denial(DenyReason::NotAdmin)),
    }
}

/// Logged in with an entitlement open at `now`.
pub fn require_access(user: Option<&User>, now: DateTime<Utc>) -> Result<&User, Denial> {
    let user = require_login(user)?;
    user.check_access(now)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entitlement;
    use chrono::Duration;

    fn user(is_admin: bool, entitlement: Entitlement) -> User {
        User {
            id: 1,
            email: "u@example.com".to_string(),
            password_hash: String::new(),
            is_admin,
            entitlement,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_require_login() {
        assert_eq!(
            require_login(None).unwrap_err().location(),
            "/login"
        );
        let u = user(false, Entitlement::default());
        assert!(require_login(Some(&u)).is_ok());
    }

    #[test]
    fn test_require_admin() {
        let customer = user(false, Entitlement::default());
        let admin = user(true, Entitlement::default());

        let denial = require_admin(Some(&customer)).unwrap_err();
        assert_eq!(denial.reason(), DenyReason::NotAdmin);
        assert_eq!(denial.location(), "/");
        assert_eq!(require_admin(None).unwrap_err().reason(), DenyReason::NotAdmin);
        assert!(require_admin(Some(&admin)).is_ok());
    }

    #[test]
    fn test_require_access() {
        let now = Utc::now();

        assert_eq!(
            require_access(None, now).unwrap_err().reason(),
            DenyReason::NotLoggedIn
        );

        // Flag off wins over a future expiry
        let off = user(
            false,
            Entitlement {
                has_access: false,
                access_until: Some(now + Duration::days(3)),
            },
        );
        assert_eq!(
            require_access(Some(&off), now).unwrap_err().reason(),
            DenyReason::NoAccess
        );

        let expired = user(
            false,
            Entitlement {
                has_access: true,
                access_until: Some(now - Duration::seconds(1)),
            },
        );
        assert_eq!(
            require_access(Some(&expired), now).unwrap_err().reason(),
            DenyReason::AccessExpired
        );

        let open = user(false, Entitlement::granted_for(7, now).unwrap());
        assert!(require_access(Some(&open), now).is_ok());

        let unlimited = user(
            false,
            Entitlement {
                has_access: true,
                access_until: None,
            },
        );
        assert!(require_access(Some(&unlimited), now).is_ok());
    }
}
