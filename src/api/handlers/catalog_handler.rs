//! Catalog handlers: lot listing and lot detail.

use axum::{
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use url::form_urlencoded;

use crate::api::extractors::PageContext;
use crate::api::flash::{FlashRedirect, Notice};
use crate::api::guards::require_access;
use crate::api::views::{self, CatalogView};
use crate::api::AppState;
use crate::domain::{CatalogFilter, CountrySelection};
use crate::errors::AppError;
use crate::types::PaginationParams;

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog))
        .route("/lot/:lot_number", get(lot_detail))
}

/// A country flag is on unless present with a value other than "1"
fn flag(value: Option<&str>) -> bool {
    value.map_or(true, |v| v == "1")
}

fn amount(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Read catalog filters and page from the query string.
///
/// Values that fail to parse are ignored; the last occurrence of a key wins.
pub fn parse_catalog_query(query: Option<&str>) -> (CatalogFilter, PaginationParams) {
    let mut country_kz = None;
    let mut country_ru = None;
    let mut country_cn = None;
    let mut deposit = None;
    let mut margin = None;
    let mut search = None;
    let mut page = None;

    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let slot = match &*key {
            "country_kz" => &mut country_kz,
            "country_ru" => &mut country_ru,
            "country_cn" => &mut country_cn,
            "deposit" => &mut deposit,
            "margin" => &mut margin,
            "search" => &mut search,
            "page" => &mut page,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }

    let filter = CatalogFilter {
        countries: CountrySelection {
            kz: flag(country_kz.as_deref()),
            ru: flag(country_ru.as_deref()),
            cn: flag(country_cn.as_deref()),
        },
        deposit: amount(deposit.as_deref()),
        margin: amount(margin.as_deref()),
        search: None,
    }
    .with_search(search.as_deref());

    let page = page
        .and_then(|p| p.trim().parse::<u64>().ok())
        .map(PaginationParams::page)
        .unwrap_or_default();

    (filter, page)
}

/// Filtered, paginated lot listing
pub async fn catalog(
    State(state): State<AppState>,
    ctx: PageContext,
    RawQuery(query): RawQuery,
) -> Response {
    if let Err(denial) = require_access(ctx.user(), Utc::now()) {
        return denial.into_response();
    }

    let (filter, page) = parse_catalog_query(query.as_deref());
    match state.catalog_service.list_lots(&filter, page).await {
        Ok(lots) => {
            let view = CatalogView {
                filter: &filter,
                page: &lots,
            };
            ctx.render("Catalog", &views::catalog_page(&view))
        }
        Err(e) => e.redirect_to("/").into_response(),
    }
}

/// One lot with its offers grouped by country
pub async fn lot_detail(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(lot_number): Path<String>,
) -> Response {
    if let Err(denial) = require_access(ctx.user(), Utc::now()) {
        return denial.into_response();
    }

    match state.catalog_service.lot_detail(&lot_number).await {
        Ok(detail) => ctx.render(&detail.lot.lot_number, &views::lot_page(&detail)),
        Err(AppError::NotFound) => {
            FlashRedirect::new("/catalog", Notice::danger("Lot not found")).into_response()
        }
        Err(e) => e.redirect_to("/").into_response(),
    }
}
