//! # Invoice Routes

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use ledger_core::{Invoice, InvoiceInput, InvoiceQuery, InvoiceView};

use super::parse_id;
use crate::error::ApiResult;
use crate::service::Mutation;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Invoice>>> {
    Ok(Json(state.service.list_invoices().await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_invoice(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Mutation<Invoice>>)> {
    let Json(input) = payload?;
    let created = state.service.create_invoice(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<InvoiceInput>, JsonRejection>,
) -> ApiResult<Json<Mutation<Invoice>>> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    Ok(Json(state.service.update_invoice(id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<Invoice>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.delete_invoice(id).await?))
}

pub async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
) -> ApiResult<Json<Vec<Invoice>>> {
    debug!(term = %term, "search invoices");
    Ok(Json(state.service.search_invoices(&term).await?))
}

/// `GET /api/invoices/view?search=&month=&day=&category=`
pub async fn view(
    State(state): State<AppState>,
    query: Result<Query<InvoiceQuery>, QueryRejection>,
) -> ApiResult<Json<InvoiceView>> {
    let Query(query) = query?;
    Ok(Json(state.service.view_invoices(&query).await?))
}
