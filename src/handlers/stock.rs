use crate::errors::ServiceError;
use crate::services::stock::{self, ExistenceFilter, ExistenceRow, ExistenceSummary};
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ExistenceResponse {
    pub rows: Vec<ExistenceRow>,
    pub summary: ExistenceSummary,
}

/// Create the stock router
pub fn router() -> Router<AppState> {
    Router::new().route("/existence", get(existence))
}

/// On-hand quantities across the selected warehouses, with totals.
///
/// Multi-select warehouses arrive as a repeated `warehouse_id` parameter
/// (`?warehouse_id=1&warehouse_id=2`), never a comma-joined value, so the
/// raw pair list is decoded by hand instead of a derived struct.
#[utoipa::path(
    get,
    path = "/api/v1/stock/existence",
    params(
        ("warehouse_id" = Option<i64>, Query, description = "Warehouse filter; repeat for multi-select"),
        ("article_id" = Option<i64>, Query, description = "Restrict to one article"),
        ("line_id" = Option<i64>, Query, description = "Restrict to one article line"),
        ("only_with_stock" = Option<bool>, Query, description = "Exclude zero-quantity rows")
    ),
    responses(
        (status = 200, description = "Existence rows and summary returned", body = ExistenceResponse),
        (status = 400, description = "Invalid filter value", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn existence(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = parse_existence_query(&pairs)?;
    let rows = state.services.stock.query(&filter).await?;
    let summary = stock::summarize(&rows);
    Ok((StatusCode::OK, Json(ExistenceResponse { rows, summary })))
}

fn parse_existence_query(pairs: &[(String, String)]) -> Result<ExistenceFilter, ServiceError> {
    let mut filter = ExistenceFilter::default();
    for (key, value) in pairs {
        // The source client sends empty strings for unused filters
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "warehouse_id" => filter.warehouse_ids.push(parse_id(key, value)?),
            "article_id" => filter.article_id = Some(parse_id(key, value)?),
            "line_id" => filter.line_id = Some(parse_id(key, value)?),
            "only_with_stock" => {
                filter.only_with_stock = matches!(value.as_str(), "true" | "1");
            }
            _ => {}
        }
    }
    Ok(filter)
}

fn parse_id(key: &str, value: &str) -> Result<i64, ServiceError> {
    value
        .parse::<i64>()
        .map_err(|_| ServiceError::InvalidInput(format!("{} must be an integer, got '{}'", key, value)))
}
