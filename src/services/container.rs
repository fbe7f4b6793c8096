//! Service Container - Centralized service access.
//!
//! Wires repositories into services once at start-up and hands out
//! shared trait objects.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AdminManager, AdminService, AuthService, Authenticator, CatalogManager, CatalogService,
};
use crate::config::Config;
use crate::infra::{TenderRepository, TenderStore, TokenSigner, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn admin(&self) -> Arc<dyn AdminService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    admin_service: Arc<dyn AdminService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        admin_service: Arc<dyn AdminService>,
        catalog_service: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            auth_service,
            admin_service,
            catalog_service,
        }
    }

    /// Build every service over the user store and the optional tender store
    pub fn from_connections(
        users_db: Arc<DatabaseConnection>,
        tender_db: Option<Arc<DatabaseConnection>>,
        config: &Config,
    ) -> Self {
        let users = Arc::new(UserStore::new(users_db));
        let tenders: Option<Arc<dyn TenderRepository>> =
            tender_db.map(|db| Arc::new(TenderStore::new(db)) as Arc<dyn TenderRepository>);

        let auth_service = Arc::new(Authenticator::new(
            users.clone(),
            TokenSigner::from_config(config),
            config.session_expiration_hours,
        ));
        let admin_service = Arc::new(AdminManager::new(users, tenders.clone()));
        let catalog_service = Arc::new(CatalogManager::new(tenders));

        Self::new(auth_service, admin_service, catalog_service)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }
}
