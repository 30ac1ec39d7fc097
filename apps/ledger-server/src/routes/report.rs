//! # Report Routes
//!
//! Dashboard statistics, monthly reconciliation and the health check.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ledger_core::{MonthlyReconciliation, Statistics};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// 200 when the store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.service.health().await {
        (StatusCode::OK, Json(HealthResponse { status: "ok", database: true }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                database: false,
            }),
        )
    }
}

pub async fn statistics(State(state): State<AppState>) -> ApiResult<Json<Statistics>> {
    Ok(Json(state.service.get_statistics().await?))
}

/// `YYYY-MM` only.
pub async fn reconciliation(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Json<MonthlyReconciliation>> {
    Ok(Json(state.service.get_monthly_reconciliation(&month).await?))
}
