use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let Some(pool) = state.postgres_pool else {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                store: "in-memory",
                detail: None,
            }),
        );
    };

    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                store: "postgres",
                detail: None,
            }),
        ),
        Err(check_error) => {
            error!(error = %check_error, "postgres health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    store: "postgres",
                    detail: Some("postgres unavailable".to_owned()),
                }),
            )
        }
    }
}
