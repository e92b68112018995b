//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use sea_orm::DbErr;
use serde::Serialize;

use crate::infra::Database;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes(database: Database) -> Router {
    Router::new()
        .route("/", get(health_check))
        .with_state(database)
}

/// Health check endpoint - verifies database connectivity.
pub async fn health_check(State(database): State<Database>) -> (StatusCode, Json<HealthResponse>) {
    health_report(database.ping().await)
}

fn health_report(ping: Result<(), DbErr>) -> (StatusCode, Json<HealthResponse>) {
    let database = match ping {
        Ok(()) => ServiceHealth {
            status: "healthy",
            error: None,
        },
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            ServiceHealth {
                status: "unhealthy",
                error: Some(e.to_string()),
            }
        }
    };

    let healthy = database.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceStatus { database },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_report() {
        let (status, Json(body)) = health_report(Ok(()));

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({
                "status": "healthy",
                "services": { "database": { "status": "healthy" } }
            })
        );
    }

    #[test]
    fn test_failed_ping_is_degraded() {
        let (status, Json(body)) =
            health_report(Err(DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection refused".to_string(),
            ))));

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.services.database.status, "unhealthy");
        assert!(body
            .services
            .database
            .error
            .as_deref()
            .unwrap()
            .contains("connection refused"));
    }
}
