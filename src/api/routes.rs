//! Application route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::flash::flash_middleware;
use super::handlers::{admin_routes, auth_routes, catalog_routes, home_routes, stats_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing page and health check
        .merge(home_routes())
        // Registration, login, logout
        .merge(auth_routes())
        // Access-gated catalog
        .merge(catalog_routes())
        // Admin-only pages
        .merge(admin_routes())
        // Public JSON
        .merge(stats_routes())
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            flash_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
