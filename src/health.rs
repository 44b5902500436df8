use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    database: String,
    ledger_size: i64,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match check_database_health(&state.db_pool).await {
        Ok(ledger_size) => {
            debug!(ledger_size, "health check passed");
            Ok(Json(HealthResponse {
                status: "OK".to_string(),
                database: "healthy".to_string(),
                ledger_size,
            }))
        }
        Err(e) => {
            error!(error = %e, "database health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Round-trips to the database and reports how many source URLs are consumed.
async fn check_database_health(pool: &Pool<Postgres>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM scraped_urls")
        .fetch_one(pool)
        .await
}
