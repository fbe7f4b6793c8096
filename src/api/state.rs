//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use super::cookies::CookieSettings;
use crate::config::Config;
use crate::infra::{Database, TenderDatabase, TokenSigner};
use crate::services::{AdminService, AuthService, CatalogService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and session resolution
    pub auth_service: Arc<dyn AuthService>,
    /// Dashboard and access management
    pub admin_service: Arc<dyn AdminService>,
    /// Lot listing and detail
    pub catalog_service: Arc<dyn CatalogService>,
    /// Signs the notice cookie
    pub signer: TokenSigner,
    pub cookies: CookieSettings,
    /// User store connection
    pub database: Arc<Database>,
    /// Tender store connection, absent when unconfigured
    pub tender_database: Option<Arc<TenderDatabase>>,
}

impl AppState {
    /// Create application state from the store connections and config.
    pub fn from_config(
        database: Arc<Database>,
        tender_database: Option<Arc<TenderDatabase>>,
        config: &Config,
    ) -> Self {
        let container = Services::from_connections(
            database.get_connection(),
            tender_database.as_ref().map(|db| db.get_connection()),
            config,
        );

        Self {
            auth_service: container.auth(),
            admin_service: container.admin(),
            catalog_service: container.catalog(),
            signer: TokenSigner::from_config(config),
            cookies: CookieSettings::from_config(config),
            database,
            tender_database,
        }
    }
}
