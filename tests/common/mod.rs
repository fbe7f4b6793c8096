//! Shared helpers for HTTP-level tests.
//!
//! The user store is an in-memory SQLite database with real migrations;
//! the tender store, when present, is a sea-orm mock connection.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use tender_catalog::api::{create_router, AppState};
use tender_catalog::config::Config;
use tender_catalog::infra::{Database, TenderDatabase};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub database: Arc<Database>,
}

impl TestApp {
    /// Build an app over a fresh user store and an optional tender connection
    pub async fn new(tender: Option<DatabaseConnection>) -> Self {
        let config = Config::new("integration-test-secret-key-0123456789");
        let database = Database::connect_url("sqlite::memory:").await.unwrap();
        database.run_migrations().await.unwrap();
        let database = Arc::new(database);
        let tender = tender.map(|conn| Arc::new(TenderDatabase::from_connection(conn)));

        let state = AppState::from_config(database.clone(), tender, &config);
        state
            .auth_service
            .bootstrap_admin(ADMIN_EMAIL.to_string(), ADMIN_PASSWORD.to_string())
            .await
            .unwrap();

        Self {
            router: create_router(state.clone()),
            state,
            database,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Minimal browser: keeps cookies between requests
#[derive(Default)]
pub struct Browser {
    cookies: BTreeMap<String, String>,
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn store(&mut self, response: &Response) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap();
            let (name, value) = pair.split_once('=').unwrap();
            if value.is_empty() || raw.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn get(&mut self, app: &TestApp, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .header(header::COOKIE, self.cookie_header())
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        self.store(&response);
        response
    }

    pub async fn post_form(&mut self, app: &TestApp, uri: &str, form: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, self.cookie_header())
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = app.send(request).await;
        self.store(&response);
        response
    }

    pub async fn register(&mut self, app: &TestApp, email: &str, password: &str) -> Response {
        self.post_form(
            app,
            "/register",
            &[
                ("email", email),
                ("password", password),
                ("password_confirm", password),
            ],
        )
        .await
    }

    pub async fn login(&mut self, app: &TestApp, email: &str, password: &str) -> Response {
        self.post_form(app, "/login", &[("email", email), ("password", password)])
            .await
    }
}

pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
