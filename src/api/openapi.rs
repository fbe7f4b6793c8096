//! OpenAPI documentation configuration.
//!
//! Covers the JSON surface only; HTML pages are not documented here.

use utoipa::OpenApi;

use crate::api::handlers::{home_handler, stats_handler};

/// OpenAPI documentation for the Tender Catalog JSON endpoints
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tender Catalog",
        version = "0.1.0",
        description = "Subscription-gated catalog of procurement lots matched with marketplace offers",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        stats_handler::stats,
        home_handler::health,
    ),
    components(
        schemas(
            stats_handler::StatsResponse,
            home_handler::HealthResponse,
            home_handler::ServiceHealth,
            home_handler::ServiceStatus,
        )
    ),
    tags(
        (name = "Statistics", description = "Public tender store figures"),
        (name = "System", description = "Liveness and connectivity")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_json_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/stats"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
