//! Database connections for the user store and the tender store.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{Config, TENDER_ACQUIRE_TIMEOUT_SECONDS};

pub mod migrations;

pub use migrations::Migrator;

/// User store connection (accounts, credentials, entitlements)
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Connect to the user store and run pending migrations.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;
        db.run_migrations().await?;
        tracing::info!("User store connected and migrations applied");
        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        Self::connect_url(&config.users_database_url).await
    }

    /// Connect to an explicit URL.
    ///
    /// In-memory SQLite keeps a single pooled connection, since every
    /// new connection would open a fresh empty database.
    pub async fn connect_url(url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url.to_string());
        if url.contains(":memory:") {
            options.max_connections(1).min_connections(1);
        }
        options.sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(self.connection.as_ref(), None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(self.connection.as_ref(), Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(self.connection.as_ref())
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(self.connection.as_ref()).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        ping(self.connection.as_ref()).await
    }
}

/// Read-only tender store connection (lots and matched offers)
#[derive(Clone)]
pub struct TenderDatabase {
    connection: Arc<DatabaseConnection>,
}

impl TenderDatabase {
    /// Open a lazy pool to the tender store.
    ///
    /// Nothing is dialled until the first query, so an unreachable store
    /// shows up as a per-request error instead of a start-up failure.
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url.to_string());
        options
            .connect_lazy(true)
            .acquire_timeout(Duration::from_secs(TENDER_ACQUIRE_TIMEOUT_SECONDS))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self::from_connection(connection))
    }

    /// Connect when the configuration names a tender store.
    ///
    /// A bad URL is logged and treated like an unconfigured store.
    pub async fn from_config(config: &Config) -> Option<Self> {
        let url = config.tender_database_url.as_deref()?;
        match Self::connect(url).await {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::error!(error = %e, "Tender store could not be opened, catalog disabled");
                None
            }
        }
    }

    /// Wrap an existing connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        ping(self.connection.as_ref()).await
    }
}

async fn ping(connection: &DatabaseConnection) -> Result<(), DbErr> {
    connection
        .execute(Statement::from_string(
            connection.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_clones_share_one_mock_connection() {
        let connection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let db = TenderDatabase::from_connection(connection);
        let copy = db.clone();

        assert!(Arc::ptr_eq(&db.get_connection(), &copy.get_connection()));
        copy.ping().await.unwrap();
        // The single queued result was consumed through the clone
        assert!(db.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_user_store_migrates() {
        let db = Database::connect_url("sqlite::memory:").await.unwrap();
        db.run_migrations().await.unwrap();

        let status = db.clone().migration_status().await.unwrap();
        assert!(status.iter().all(|(_, applied)| *applied));
        db.ping().await.unwrap();
    }
}
