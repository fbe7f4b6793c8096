//! Catalog service - Lot listing, lot detail and public statistics.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{CatalogFilter, LotDetail, LotSummary, ProductsByCountry};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::TenderRepository;
use crate::types::{Paginated, PaginationMeta, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Tender store figures exposed without login
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublicStats {
    pub lots: u64,
    pub products: u64,
    pub by_marketplace: BTreeMap<String, u64>,
}

/// Catalog service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// One page of lots matching the filter
    async fn list_lots(
        &self,
        filter: &CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<LotSummary>>;

    /// A lot with its offers grouped by country
    async fn lot_detail(&self, lot_number: &str) -> AppResult<LotDetail>;

    /// Store-wide counts; zero when the store is unavailable
    async fn public_stats(&self) -> PublicStats;
}

/// Concrete implementation of CatalogService.
pub struct CatalogManager {
    tenders: Option<Arc<dyn TenderRepository>>,
}

impl CatalogManager {
    pub fn new(tenders: Option<Arc<dyn TenderRepository>>) -> Self {
        Self { tenders }
    }

    fn store(&self) -> AppResult<&Arc<dyn TenderRepository>> {
        self.tenders
            .as_ref()
            .ok_or_else(|| AppError::storage("DATABASE_URL is not configured"))
    }

    async fn try_public_stats(&self) -> AppResult<PublicStats> {
        let store = self.store()?;
        let (totals, by_marketplace) = tokio::try_join!(store.totals(), store.marketplace_counts())?;

        Ok(PublicStats {
            lots: totals.lots,
            products: totals.products,
            by_marketplace,
        })
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn list_lots(
        &self,
        filter: &CatalogFilter,
        page: PaginationParams,
    ) -> AppResult<Paginated<LotSummary>> {
        let store = self.store()?;

        let total = store.count_lots(filter).await?;
        let meta = PaginationMeta::new(page, total);
        if meta.is_past_end() {
            return Ok(Paginated::empty(meta));
        }

        let lots = store.list_lots(filter, page.limit(), page.offset()).await?;
        tracing::debug!(total, page = page.page, rows = lots.len(), "Catalog page loaded");
        Ok(Paginated::new(lots, meta))
    }

    async fn lot_detail(&self, lot_number: &str) -> AppResult<LotDetail> {
        let store = self.store()?;

        let lot = store.find_lot(lot_number).await?.ok_or_not_found()?;
        let products = store.products_for_lot(lot_number).await?;
        let products_by_country = ProductsByCountry::partition(products);
        let total_products = products_by_country.len();

        Ok(LotDetail {
            lot,
            products_by_country,
            total_products,
        })
    }

    async fn public_stats(&self) -> PublicStats {
        self.try_public_stats().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Public stats unavailable, reporting zero");
            PublicStats::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tender::fixtures::{lot, product};
    use crate::domain::Country;
    use crate::infra::{MockTenderRepository, TenderTotals};
    use mockall::predicate::eq;

    fn summary(lot_number: &str) -> LotSummary {
        LotSummary {
            lot: lot(lot_number, "Стальные трубы"),
            products_count: 2,
            min_price: Some(5000.0),
        }
    }

    fn service(repo: MockTenderRepository) -> CatalogManager {
        CatalogManager::new(Some(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_list_lots_pages() {
        let mut repo = MockTenderRepository::new();
        repo.expect_count_lots().returning(|_| Ok(41));
        repo.expect_list_lots()
            .with(mockall::predicate::always(), eq(20), eq(20))
            .times(1)
            .returning(|_, _, _| Ok(vec![summary("LOT-21")]));

        let page = service(repo)
            .list_lots(&CatalogFilter::default(), PaginationParams::page(2))
            .await
            .unwrap();
        assert_eq!(page.meta.total, 41);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_page_past_end_skips_listing_query() {
        let mut repo = MockTenderRepository::new();
        repo.expect_count_lots().returning(|_| Ok(15));
        repo.expect_list_lots().times(0);

        let page = service(repo)
            .list_lots(&CatalogFilter::default(), PaginationParams::page(4))
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_pages, 1);
    }

    #[tokio::test]
    async fn test_unconfigured_store() {
        let svc = CatalogManager::new(None);
        let err = svc
            .list_lots(&CatalogFilter::default(), PaginationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert_eq!(svc.public_stats().await, PublicStats::default());
    }

    #[tokio::test]
    async fn test_lot_detail_groups_products() {
        let mut repo = MockTenderRepository::new();
        repo.expect_find_lot()
            .with(eq("LOT-1"))
            .returning(|n| Ok(Some(lot(n, "Трубы"))));
        repo.expect_products_for_lot().returning(|_| {
            Ok(vec![
                product(1, "1688", "¥30"),
                product(2, "kaspi.kz", "5 000 ₸"),
                product(3, "wildberries", "900 ₽"),
            ])
        });

        let detail = service(repo).lot_detail("LOT-1").await.unwrap();
        assert_eq!(detail.total_products, 3);
        assert_eq!(detail.products_by_country.get(Country::Cn).len(), 1);
        assert_eq!(detail.products_by_country.get(Country::Kz).len(), 1);
        assert_eq!(detail.products_by_country.get(Country::Ru).len(), 1);
    }

    #[tokio::test]
    async fn test_lot_detail_not_found() {
        let mut repo = MockTenderRepository::new();
        repo.expect_find_lot().returning(|_| Ok(None));
        repo.expect_products_for_lot().times(0);

        let err = service(repo).lot_detail("NOPE").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_public_stats() {
        let mut repo = MockTenderRepository::new();
        repo.expect_totals().returning(|| {
            Ok(TenderTotals {
                lots: 2,
                products: 5,
            })
        });
        repo.expect_marketplace_counts().returning(|| {
            Ok(BTreeMap::from([
                ("kaspi".to_string(), 3),
                ("taobao".to_string(), 2),
            ]))
        });

        let stats = service(repo).public_stats().await;
        assert_eq!(stats.lots, 2);
        assert_eq!(stats.by_marketplace.get("kaspi"), Some(&3));
    }
}
