//! Landing page and health check.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::PageContext;
use crate::api::{views, AppState};

/// Create home and health routes
pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

pub async fn home(State(state): State<AppState>, ctx: PageContext) -> Response {
    let stats = state.catalog_service.public_stats().await;
    ctx.render("Home", &views::home_page(ctx.user(), &stats, Utc::now()))
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    #[schema(example = "healthy")]
    pub status: &'static str,
    pub services: ServiceHealth,
}

/// Individual store health
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub user_store: ServiceStatus,
    pub tender_store: ServiceStatus,
}

/// Store status
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// `healthy`, `unhealthy` or `unconfigured`
    #[schema(example = "healthy")]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    fn from_ping(result: Result<(), sea_orm::DbErr>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }
}

/// Health check with user store and tender store connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "User store reachable", body = HealthResponse),
        (status = 503, description = "User store unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let user_store = ServiceStatus::from_ping(state.database.ping().await);
    let tender_store = match &state.tender_database {
        Some(db) => ServiceStatus::from_ping(db.ping().await),
        None => ServiceStatus {
            status: "unconfigured",
            error: None,
        },
    };

    let users_ok = user_store.status == "healthy";
    let all_healthy = users_ok && tender_store.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            user_store,
            tender_store,
        },
    };

    let status_code = if users_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
