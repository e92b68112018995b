//! User Service Library
//!
//! This crate provides user management over HTTP: a users CRUD router backed
//! by PostgreSQL, plus health check, OpenAPI docs and migration commands.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

use tokio::signal;
use tracing::info;

use common::{AppError, AppResult};

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server until Ctrl+C.
pub async fn serve(config: UserServiceConfig) -> AppResult<()> {
    info!("Starting {}...", config.service.service_name);

    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Build router
    let addr = config.service.addr();
    let app = create_router(AppState::from_database(db, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("User service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("User service stopped");
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for migration in db.migration_status().await? {
                let marker = if migration.applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, migration.name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, draining connections..."),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
