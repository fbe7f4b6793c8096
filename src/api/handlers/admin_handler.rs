//! Admin handlers: dashboard, user list and access toggling.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::api::extractors::{LenientForm, PageContext};
use crate::api::flash::{FlashRedirect, Notice};
use crate::api::guards::require_admin;
use crate::api::{views, AppState};
use crate::errors::AppError;

/// Toggle form body; a missing or non-numeric `days` revokes access
#[derive(Debug, Default, Deserialize)]
pub struct ToggleAccessForm {
    #[serde(default)]
    pub days: Option<String>,
}

impl ToggleAccessForm {
    pub fn days(&self) -> Option<i64> {
        self.days.as_deref().and_then(|d| d.trim().parse().ok())
    }
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id/toggle-access", post(toggle_access))
}

pub async fn dashboard(State(state): State<AppState>, ctx: PageContext) -> Response {
    if let Err(denial) = require_admin(ctx.user()) {
        return denial.into_response();
    }

    match state.admin_service.dashboard_stats().await {
        Ok(stats) => ctx.render("Admin", &views::dashboard_page(&stats)),
        Err(e) => e.redirect_to("/").into_response(),
    }
}

pub async fn list_users(State(state): State<AppState>, ctx: PageContext) -> Response {
    if let Err(denial) = require_admin(ctx.user()) {
        return denial.into_response();
    }

    match state.admin_service.list_users().await {
        Ok(users) => ctx.render("Users", &views::users_page(&users, Utc::now())),
        Err(e) => e.redirect_to("/admin").into_response(),
    }
}

/// Grant access for `days` days, or revoke it
pub async fn toggle_access(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(user_id): Path<i32>,
    LenientForm(form): LenientForm<ToggleAccessForm>,
) -> Response {
    let admin = match require_admin(ctx.user()) {
        Ok(admin) => admin,
        Err(denial) => return denial.into_response(),
    };

    let days = form.days();
    match state.admin_service.toggle_access(user_id, days).await {
        Ok(user) => {
            tracing::info!(admin_id = admin.id, user_id, "Entitlement changed by admin");
            let notice = match (user.entitlement.has_access, days) {
                (true, Some(days)) => Notice::success(format!("Access granted for {} days", days)),
                _ => Notice::success("Access revoked"),
            };
            FlashRedirect::new("/admin/users", notice).into_response()
        }
        Err(AppError::NotFound) => {
            FlashRedirect::new("/admin/users", Notice::danger("User not found")).into_response()
        }
        Err(e) => e.redirect_to("/admin/users").into_response(),
    }
}
