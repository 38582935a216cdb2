use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WarehouseQuery {
    /// Scope the warehouse list to one branch
    pub branch_id: Option<i64>,
}

/// Flat catalog routes consumed as-is by the workflow
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/branches", get(list_branches))
        .route("/warehouses", get(list_warehouses))
        .route("/currencies", get(list_currencies))
        .route("/adjustment-reasons", get(list_reasons))
}

pub async fn list_branches(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let branches = state.services.catalogs.list_branches().await?;
    Ok((StatusCode::OK, Json(branches)))
}

/// Warehouses, re-fetched with `branch_id` when the user picks a branch
pub async fn list_warehouses(
    State(state): State<AppState>,
    Query(query): Query<WarehouseQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouses = state
        .services
        .catalogs
        .list_warehouses(query.branch_id)
        .await?;
    Ok((StatusCode::OK, Json(warehouses)))
}

pub async fn list_currencies(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let currencies = state.services.catalogs.list_currencies().await?;
    Ok((StatusCode::OK, Json(currencies)))
}

pub async fn list_reasons(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let reasons = state.services.catalogs.list_reasons().await?;
    Ok((StatusCode::OK, Json(reasons)))
}
