//! Public JSON statistics.

use std::collections::BTreeMap;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::services::PublicStats;

/// Tender store statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Number of lots
    #[schema(example = 1250)]
    pub lots: u64,
    /// Number of matched offers
    #[schema(example = 18400)]
    pub products: u64,
    /// Offers per marketplace name
    pub by_marketplace: BTreeMap<String, u64>,
}

impl From<PublicStats> for StatsResponse {
    fn from(stats: PublicStats) -> Self {
        Self {
            lots: stats.lots,
            products: stats.products,
            by_marketplace: stats.by_marketplace,
        }
    }
}

/// Create JSON API routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(stats))
}

/// Lot and offer counts; all zero while the tender store is unavailable
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Statistics",
    responses(
        (status = 200, description = "Current counts", body = StatsResponse)
    )
)]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.catalog_service.public_stats().await.into())
}
