//! One-shot notices carried across a redirect.
//!
//! Handlers return a [`FlashRedirect`]; it only records the notice in the
//! response extensions. [`flash_middleware`] signs pending notices into the
//! flash cookie, and clears it once a page has rendered them.

use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::cookies::extract_cookie;
use super::AppState;
use crate::config::{FLASH_COOKIE, FLASH_TTL_SECONDS};
use crate::infra::TokenSigner;

/// Severity of a notice, doubling as its CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Danger => "danger",
        }
    }
}

/// A message shown once on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }
}

/// Notices a response wants delivered on the next page
#[derive(Debug, Clone, Default)]
pub struct PendingNotices(pub Vec<Notice>);

/// Marker set by a rendered page: the notices it showed are spent
#[derive(Debug, Clone, Copy)]
pub struct FlashConsumed;

/// Signed payload of the flash cookie
#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    notices: Vec<Notice>,
    exp: i64,
}

/// Redirect (303) carrying a notice for the target page
#[derive(Debug, Clone)]
pub struct FlashRedirect {
    pub location: String,
    pub notice: Notice,
}

impl FlashRedirect {
    pub fn new(location: impl Into<String>, notice: Notice) -> Self {
        Self {
            location: location.into(),
            notice,
        }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();
        response
            .extensions_mut()
            .insert(PendingNotices(vec![self.notice]));
        response
    }
}

/// Notices stored in the request's flash cookie, if it verifies
pub fn read_notices(headers: &HeaderMap, signer: &TokenSigner) -> Vec<Notice> {
    extract_cookie(headers, FLASH_COOKIE)
        .and_then(|token| signer.verify::<FlashClaims>(&token).ok())
        .map(|claims| claims.notices)
        .unwrap_or_default()
}

/// Persist pending notices and drop consumed ones.
pub async fn flash_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let existing = read_notices(request.headers(), &state.signer);
    let mut response = next.run(request).await;

    let pending = response.extensions_mut().remove::<PendingNotices>();
    let consumed = response.extensions_mut().remove::<FlashConsumed>().is_some();
    if pending.is_none() && !consumed {
        return response;
    }

    let mut notices = if consumed { Vec::new() } else { existing };
    notices.extend(pending.map(|p| p.0).unwrap_or_default());

    let header = if notices.is_empty() {
        state.cookies.flash.delete_header()
    } else {
        let claims = FlashClaims {
            notices,
            exp: (Utc::now() + Duration::seconds(FLASH_TTL_SECONDS)).timestamp(),
        };
        match state.signer.sign(&claims) {
            Ok(token) => state.cookies.flash.set_header(&token),
            Err(e) => {
                tracing::error!(error = %e, "Failed to sign notices");
                None
            }
        }
    };

    if let Some(header) = header {
        response.headers_mut().append(SET_COOKIE, header);
    }
    response
}
