//! Read-only access to the tender store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::catalog_query::CatalogQuery;
use super::entities::{lot, search_result};
use crate::domain::{CatalogFilter, Lot, LotSummary, Product};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Row counts of the tender store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenderTotals {
    pub lots: u64,
    pub products: u64,
}

/// Tender repository trait for dependency injection.
///
/// Every failure of the underlying store surfaces as
/// `AppError::StorageUnavailable`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Number of lots matching the filter
    async fn count_lots(&self, filter: &CatalogFilter) -> AppResult<u64>;

    /// One page of matching lots, newest first
    async fn list_lots(
        &self,
        filter: &CatalogFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<LotSummary>>;

    async fn find_lot(&self, lot_number: &str) -> AppResult<Option<Lot>>;

    /// Offers matched to a lot, by marketplace then raw price
    async fn products_for_lot(&self, lot_number: &str) -> AppResult<Vec<Product>>;

    async fn totals(&self) -> AppResult<TenderTotals>;

    /// Offer count per marketplace name
    async fn marketplace_counts(&self) -> AppResult<BTreeMap<String, u64>>;
}

/// Listing row: lot columns plus the offer aggregate
#[derive(Debug, FromQueryResult)]
struct LotRow {
    id: i32,
    lot_number: String,
    original_name: String,
    simplified_name: Option<String>,
    tender_price: Option<f64>,
    quantity: Option<f64>,
    created_at: Option<NaiveDateTime>,
    products_count: i64,
    min_price: Option<f64>,
}

impl From<LotRow> for LotSummary {
    fn from(row: LotRow) -> Self {
        LotSummary {
            lot: Lot {
                id: row.id,
                lot_number: row.lot_number,
                original_name: row.original_name,
                simplified_name: row.simplified_name,
                tender_price: row.tender_price,
                quantity: row.quantity,
                created_at: row.created_at,
            },
            products_count: row.products_count.max(0) as u64,
            min_price: row.min_price,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

/// Concrete implementation of TenderRepository
pub struct TenderStore {
    db: Arc<DatabaseConnection>,
}

impl TenderStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn unavailable(e: DbErr) -> AppError {
    AppError::storage(e)
}

#[async_trait]
impl TenderRepository for TenderStore {
    async fn count_lots(&self, filter: &CatalogFilter) -> AppResult<u64> {
        let statement = CatalogQuery::new(filter).count().build();
        let row = CountRow::find_by_statement(statement)
            .one(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(row.map(|r| r.total.max(0) as u64).unwrap_or(0))
    }

    async fn list_lots(
        &self,
        filter: &CatalogFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<LotSummary>> {
        let statement = CatalogQuery::new(filter).page(limit, offset).build();
        let rows = LotRow::find_by_statement(statement)
            .all(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(rows.into_iter().map(LotSummary::from).collect())
    }

    async fn find_lot(&self, lot_number: &str) -> AppResult<Option<Lot>> {
        let model = lot::Entity::find()
            .filter(lot::Column::LotNumber.eq(lot_number))
            .one(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(model.map(Lot::from))
    }

    async fn products_for_lot(&self, lot_number: &str) -> AppResult<Vec<Product>> {
        let models = search_result::Entity::find()
            .filter(search_result::Column::LotNumber.eq(lot_number))
            .order_by_asc(search_result::Column::Marketplace)
            .order_by_asc(search_result::Column::ProductPrice)
            .all(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn totals(&self) -> AppResult<TenderTotals> {
        let lots = lot::Entity::find()
            .count(self.db.as_ref())
            .await
            .map_err(unavailable)?;
        let products = search_result::Entity::find()
            .count(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(TenderTotals { lots, products })
    }

    async fn marketplace_counts(&self) -> AppResult<BTreeMap<String, u64>> {
        let rows: Vec<(String, i64)> = search_result::Entity::find()
            .select_only()
            .column(search_result::Column::Marketplace)
            .column_as(Expr::col(search_result::Column::Id).count(), "count")
            .group_by(search_result::Column::Marketplace)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(rows
            .into_iter()
            .map(|(marketplace, count)| (marketplace, count.max(0) as u64))
            .collect())
    }
}
