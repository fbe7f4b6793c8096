//! Admin service - Dashboard figures and access management.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::{Entitlement, User};
use crate::errors::AppResult;
use crate::infra::{TenderRepository, TenderTotals, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Figures shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub user_count: u64,
    pub active_user_count: u64,
    pub lot_count: u64,
    pub product_count: u64,
}

/// Admin service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Customer and tender counts; tender counts fall back to zero
    async fn dashboard_stats(&self) -> AppResult<DashboardStats>;

    /// Customer accounts, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Grant access for `days` days when positive, revoke otherwise
    async fn toggle_access(&self, user_id: i32, days: Option<i64>) -> AppResult<User>;
}

/// Concrete implementation of AdminService.
pub struct AdminManager {
    users: Arc<dyn UserRepository>,
    tenders: Option<Arc<dyn TenderRepository>>,
}

impl AdminManager {
    pub fn new(users: Arc<dyn UserRepository>, tenders: Option<Arc<dyn TenderRepository>>) -> Self {
        Self { users, tenders }
    }

    async fn tender_totals(&self) -> TenderTotals {
        let Some(tenders) = &self.tenders else {
            return TenderTotals::default();
        };
        tenders.totals().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Tender totals unavailable, showing zero");
            TenderTotals::default()
        })
    }
}

#[async_trait]
impl AdminService for AdminManager {
    async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let (customers, tenders) = tokio::join!(
            self.users.count_customers(Utc::now()),
            self.tender_totals()
        );
        let customers = customers?;

        Ok(DashboardStats {
            user_count: customers.total,
            active_user_count: customers.active,
            lot_count: tenders.lots,
            product_count: tenders.products,
        })
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list_customers().await
    }

    async fn toggle_access(&self, user_id: i32, days: Option<i64>) -> AppResult<User> {
        let entitlement = match days {
            Some(days) if days > 0 => Entitlement::granted_for(days, Utc::now())?,
            _ => Entitlement::revoked(),
        };

        let user = self.users.set_entitlement(user_id, entitlement).await?;
        if entitlement.has_access {
            tracing::info!(user_id, days = ?days, until = ?entitlement.access_until, "Access granted");
        } else {
            tracing::info!(user_id, "Access revoked");
        }
        Ok(user)
    }
}
