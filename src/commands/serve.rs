//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, TenderDatabase};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // User store is required; migrations run on connect
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("User store connection failed: {}", e)))?;
    let db = Arc::new(db);

    // Tender store is optional; without it the catalog reports itself unavailable
    let tender_db = TenderDatabase::from_config(&config).await.map(Arc::new);
    if tender_db.is_none() {
        tracing::warn!("DATABASE_URL is not configured, catalog pages will be unavailable");
    }

    let app_state = AppState::from_config(db, tender_db, &config);

    let created = app_state
        .auth_service
        .bootstrap_admin(config.admin_email.clone(), config.admin_password().to_string())
        .await?;
    if created {
        tracing::info!(email = %config.admin_email, "Bootstrap admin account created");
    }

    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
