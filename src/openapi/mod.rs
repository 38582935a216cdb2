use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockDesk API",
        version = "0.1.0",
        description = r#"
# StockDesk Inventory Adjustment API

Backend for the inventory adjustment workflow: terminal-scoped document
numbering, per-user configuration gating, article resolution, stock existence
queries, and atomic posting/reversal of adjustment documents.

## Workflow

1. `GET /inventory-adjustments/check-config/{user_id}`: both `has_config`
   and `has_terminal` must hold before a document can be posted.
2. `GET /inventory-adjustments/next-number/{user_id}`: advisory display of
   the next terminal-scoped number; the post allocates the real one.
3. `GET /articles/resolve?term=` and `GET /articles/suggest?term=` to pick
   line articles.
4. `POST /inventory-adjustments`: one atomic document with header, lines,
   and the stock effect.
5. `DELETE /inventory-adjustments/{id}`: irreversible reversal that undoes
   the stock effect.

## Error Handling

Failures use a consistent body with appropriate HTTP status codes:

```json
{
  "error": "Bad Request",
  "message": "Validation error: branch is required",
  "request_id": "req-abc123",
  "timestamp": "2026-08-07T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080/api/v1", description = "Local development")
    ),
    tags(
        (name = "inventory-adjustments", description = "Adjustment document workflow"),
        (name = "articles", description = "Article catalog and resolution"),
        (name = "stock", description = "Stock existence queries")
    ),
    paths(
        crate::handlers::adjustments::list_adjustments,
        crate::handlers::adjustments::create_adjustment,
        crate::handlers::adjustments::get_adjustment,
        crate::handlers::adjustments::delete_adjustment,
        crate::handlers::adjustments::check_config,
        crate::handlers::adjustments::next_number,
        crate::handlers::articles::resolve_article,
        crate::handlers::articles::suggest_articles,
        crate::handlers::stock::existence,
    ),
    components(
        schemas(
            crate::handlers::adjustments::CreateAdjustmentRequest,
            crate::handlers::adjustments::CreateAdjustmentLine,
            crate::handlers::adjustments::AdjustmentResponse,
            crate::handlers::adjustments::AdjustmentLineResponse,
            crate::handlers::stock::ExistenceResponse,
            crate::models::AdjustmentKind,
            crate::services::articles::ArticleCandidate,
            crate::services::articles::Resolution,
            crate::services::configuration::ConfigStatus,
            crate::services::numbering::NextNumber,
            crate::services::stock::ExistenceRow,
            crate::services::stock::ExistenceSummary,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_covers_the_workflow_routes() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("StockDesk API"));
        assert!(json.contains("/api/v1/inventory-adjustments"));
        assert!(json.contains("/api/v1/stock/existence"));
    }
}
