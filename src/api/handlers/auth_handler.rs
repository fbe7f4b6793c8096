//! Authentication handlers.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::extractors::{LenientForm, PageContext};
use crate::api::flash::{FlashRedirect, Notice};
use crate::api::guards::require_login;
use crate::api::{views, AppState};
use crate::domain::RegisterUser;
use crate::errors::ResultExt;

/// Login form body
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// Attach a Set-Cookie header to a response
fn with_cookie(cookie: Option<HeaderValue>, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Some(cookie) = cookie {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

pub async fn register_form(ctx: PageContext) -> Response {
    ctx.render("Register", &views::register_page())
}

/// Create a customer account, then send the visitor to the login page
pub async fn register(
    State(state): State<AppState>,
    LenientForm(form): LenientForm<RegisterUser>,
) -> Result<FlashRedirect, FlashRedirect> {
    state
        .auth_service
        .register(form)
        .await
        .or_redirect("/register")?;

    Ok(FlashRedirect::new(
        "/login",
        Notice::success("Registration successful! An administrator will open your access."),
    ))
}

pub async fn login_form(ctx: PageContext) -> Response {
    ctx.render("Log in", &views::login_page())
}

/// Check credentials and start a session.
///
/// Admins land on the dashboard, everyone else on the catalog.
pub async fn login(
    State(state): State<AppState>,
    LenientForm(form): LenientForm<LoginForm>,
) -> Result<Response, FlashRedirect> {
    let user = state
        .auth_service
        .login(form.email, form.password)
        .await
        .or_redirect("/login")?;
    let token = state.auth_service.issue_session(&user).or_redirect("/login")?;

    let target = if user.is_admin() { "/admin" } else { "/catalog" };
    let redirect = FlashRedirect::new(
        target,
        Notice::success(format!("Welcome, {}!", user.email)),
    );

    Ok(with_cookie(state.cookies.session.set_header(&token), redirect))
}

/// End the session
pub async fn logout(State(state): State<AppState>, ctx: PageContext) -> Response {
    if let Err(denial) = require_login(ctx.user()) {
        return denial.into_response();
    }

    with_cookie(
        state.cookies.session.delete_header(),
        FlashRedirect::new("/", Notice::info("You have been logged out")),
    )
}
