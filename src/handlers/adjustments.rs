use crate::errors::ServiceError;
use crate::models::{AdjustmentDraft, AdjustmentKind};
use crate::services::adjustments::{AdjustmentDetail, AdjustmentFilter};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAdjustmentRequest {
    pub branch_id: i64,
    pub warehouse_id: i64,
    pub user_id: i64,
    pub currency_id: i64,
    pub reason_id: i64,
    /// Number shown to the user while editing; the server allocates the
    /// authoritative value on post.
    pub document_number: Option<i64>,
    pub document_date: Option<NaiveDate>,
    pub exchange_rate: Option<Decimal>,
    #[serde(default = "default_kind")]
    pub kind: AdjustmentKind,
    #[validate(length(max = 500))]
    pub observation: Option<String>,
    pub lines: Vec<CreateAdjustmentLine>,
}

fn default_kind() -> AdjustmentKind {
    AdjustmentKind::Positive
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdjustmentLine {
    pub article_id: i64,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentLineResponse {
    pub id: i64,
    pub item_number: i32,
    pub article_id: i64,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentResponse {
    pub id: i64,
    pub document_number: i64,
    pub formatted_number: String,
    pub terminal_id: i64,
    pub branch_id: i64,
    pub warehouse_id: i64,
    pub user_id: i64,
    pub currency_id: i64,
    pub reason_id: i64,
    pub kind: String,
    pub document_date: NaiveDate,
    pub exchange_rate: Decimal,
    pub observation: Option<String>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<AdjustmentLineResponse>,
}

impl From<AdjustmentDetail> for AdjustmentResponse {
    fn from(detail: AdjustmentDetail) -> Self {
        let header = detail.header;
        Self {
            id: header.id,
            document_number: header.document_number,
            formatted_number: detail.formatted_number,
            terminal_id: header.terminal_id,
            branch_id: header.branch_id,
            warehouse_id: header.warehouse_id,
            user_id: header.user_id,
            currency_id: header.currency_id,
            reason_id: header.reason_id,
            kind: header.kind,
            document_date: header.document_date,
            exchange_rate: header.exchange_rate,
            observation: header.observation,
            total: header.total,
            created_at: header.created_at,
            lines: detail
                .lines
                .into_iter()
                .map(|line| AdjustmentLineResponse {
                    id: line.id,
                    item_number: line.item_number,
                    article_id: line.article_id,
                    quantity: line.quantity,
                    unit_cost: line.unit_cost,
                    line_total: line.line_total,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListAdjustmentsQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub branch_id: Option<i64>,
    pub currency_id: Option<i64>,
    pub detailed: Option<bool>,
}

/// Create the inventory-adjustments router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_adjustments).post(create_adjustment))
        .route("/:id", get(get_adjustment).delete(delete_adjustment))
        .route("/check-config/:user_id", get(check_config))
        .route("/next-number/:user_id", get(next_number))
}

/// List posted adjustments matching the date/branch/currency filters
#[utoipa::path(
    get,
    path = "/api/v1/inventory-adjustments",
    params(ListAdjustmentsQuery),
    responses(
        (status = 200, description = "Adjustments returned", body = [AdjustmentResponse]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn list_adjustments(
    State(state): State<AppState>,
    Query(query): Query<ListAdjustmentsQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = AdjustmentFilter {
        date_from: query.date_from,
        date_to: query.date_to,
        branch_id: query.branch_id,
        currency_id: query.currency_id,
        detailed: query.detailed.unwrap_or(false),
    };
    let results = state.services.adjustments.list(&filter).await?;
    let body: Vec<AdjustmentResponse> = results.into_iter().map(AdjustmentResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// Post a draft as one atomic adjustment document
#[utoipa::path(
    post,
    path = "/api/v1/inventory-adjustments",
    request_body = CreateAdjustmentRequest,
    responses(
        (status = 201, description = "Adjustment posted", body = AdjustmentResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 403, description = "User configuration blocks posting", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn create_adjustment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdjustmentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;

    let mut draft = AdjustmentDraft::new(Utc::now().date_naive());
    draft.branch_id = payload.branch_id;
    draft.warehouse_id = payload.warehouse_id;
    draft.user_id = payload.user_id;
    draft.currency_id = payload.currency_id;
    draft.reason_id = payload.reason_id;
    draft.kind = payload.kind;
    draft.observation = payload.observation;
    if let Some(date) = payload.document_date {
        draft.document_date = date;
    }
    if let Some(rate) = payload.exchange_rate {
        draft.exchange_rate = rate;
    }
    if let Some(number) = payload.document_number {
        draft
            .assign_number(number)
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
    }
    for line in &payload.lines {
        draft
            .add_line(line.article_id, line.quantity, line.unit_cost)
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
    }

    let detail = state.services.adjustments.create(draft).await?;
    Ok((StatusCode::CREATED, Json(AdjustmentResponse::from(detail))))
}

/// Full adjustment detail including line items
#[utoipa::path(
    get,
    path = "/api/v1/inventory-adjustments/{id}",
    params(("id" = i64, Path, description = "Adjustment ID")),
    responses(
        (status = 200, description = "Adjustment returned", body = AdjustmentResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn get_adjustment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let detail = state.services.adjustments.get(id).await?;
    Ok((StatusCode::OK, Json(AdjustmentResponse::from(detail))))
}

/// Irreversibly reverse an adjustment, undoing its stock effect
#[utoipa::path(
    delete,
    path = "/api/v1/inventory-adjustments/{id}",
    params(("id" = i64, Path, description = "Adjustment ID")),
    responses(
        (status = 204, description = "Adjustment reversed"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Reversal would drive stock negative", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn delete_adjustment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.adjustments.reverse(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Configuration probe gating the "new adjustment" workflow
#[utoipa::path(
    get,
    path = "/api/v1/inventory-adjustments/check-config/{user_id}",
    params(("user_id" = i64, Path, description = "Acting user ID")),
    responses(
        (status = 200, description = "Configuration status returned",
            body = crate::services::configuration::ConfigStatus),
        (status = 400, description = "Invalid user id", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn check_config(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let status = state.services.configuration.check(user_id).await?;
    Ok((StatusCode::OK, Json(status)))
}

/// Next document number for the user's terminal (advisory; allocation
/// happens on post)
#[utoipa::path(
    get,
    path = "/api/v1/inventory-adjustments/next-number/{user_id}",
    params(("user_id" = i64, Path, description = "Acting user ID")),
    responses(
        (status = 200, description = "Next number returned",
            body = crate::services::numbering::NextNumber),
        (status = 400, description = "User has no terminal", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory-adjustments"
)]
pub async fn next_number(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let next = state.services.numbering.peek_next_number(user_id).await?;
    Ok((StatusCode::OK, Json(next)))
}
