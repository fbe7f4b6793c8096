//! Per-request page context: the signed-in user and pending notices.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

use crate::api::cookies::extract_cookie;
use crate::api::flash::{read_notices, FlashConsumed, Notice};
use crate::api::views;
use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::User;

/// Identity and notices resolved from the request cookies.
///
/// Resolution never fails: a missing, forged or stale session is simply
/// an anonymous visitor.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<User>,
    pub notices: Vec<Notice>,
}

impl PageContext {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Render `body` inside the layout, consuming the shown notices.
    pub fn render(&self, title: &str, body: &str) -> Response {
        let html = views::layout(title, self.user(), &self.notices, body);
        let mut response = Html(html).into_response();
        if !self.notices.is_empty() {
            response.extensions_mut().insert(FlashConsumed);
        }
        response
    }
}

#[async_trait]
impl FromRequestParts<AppState> for PageContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match extract_cookie(&parts.headers, SESSION_COOKIE) {
            Some(token) => state.auth_service.resolve_session(&token).await,
            None => None,
        };
        let notices = read_notices(&parts.headers, &state.signer);

        Ok(PageContext { user, notices })
    }
}
