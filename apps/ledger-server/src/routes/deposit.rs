//! # Deposit Routes

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use ledger_core::{Deposit, DepositInput};

use super::parse_id;
use crate::error::ApiResult;
use crate::service::Mutation;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Deposit>>> {
    Ok(Json(state.service.list_deposits().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deposit>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_deposit(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<DepositInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Mutation<Deposit>>)> {
    let Json(input) = payload?;
    let created = state.service.create_deposit(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DepositInput>, JsonRejection>,
) -> ApiResult<Json<Mutation<Deposit>>> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.service.update_deposit(id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Deposit>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.delete_deposit(id).await?))
}

/// `MM` or `YYYY-MM`.
pub async fn by_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> ApiResult<Json<Vec<Deposit>>> {
    Ok(Json(state.service.list_deposits_by_month(&month).await?))
}
