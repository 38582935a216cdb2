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
pub struct TermQuery {
    /// Free-text search term
    pub term: String,
}

/// Create the articles router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles))
        .route("/resolve", get(resolve_article))
        .route("/suggest", get(suggest_articles))
}

/// Flat article catalog read
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let articles = state.services.articles.list().await?;
    Ok((StatusCode::OK, Json(articles)))
}

/// Resolve a search term to one article: exact match on id/code/reference
/// first, then partial name matching with disambiguation. A not-found outcome
/// is informational, not an error.
#[utoipa::path(
    get,
    path = "/api/v1/articles/resolve",
    params(TermQuery),
    responses(
        (status = 200, description = "Resolution outcome returned",
            body = crate::services::articles::Resolution),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "articles"
)]
pub async fn resolve_article(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let resolution = state.services.articles.resolve(&query.term).await?;
    Ok((StatusCode::OK, Json(resolution)))
}

/// As-you-type suggestions across code, name, and reference code (first ten)
#[utoipa::path(
    get,
    path = "/api/v1/articles/suggest",
    params(TermQuery),
    responses(
        (status = 200, description = "Suggestions returned",
            body = [crate::services::articles::ArticleCandidate]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "articles"
)]
pub async fn suggest_articles(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let suggestions = state.services.articles.suggest(&query.term).await?;
    Ok((StatusCode::OK, Json(suggestions)))
}
