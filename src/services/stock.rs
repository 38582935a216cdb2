//! Stock existence queries across a selected set of warehouses, the pure
//! summary over the result, and the stock mutation primitive used by
//! adjustment posting and reversal.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{
        article::{self, Entity as Article},
        article_stock::{self, Entity as ArticleStock},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
};

/// Filters for an existence query. `warehouse_ids` arrives on the wire as a
/// repeated `warehouse_id` parameter, never a comma-joined string.
#[derive(Debug, Clone, Default)]
pub struct ExistenceFilter {
    pub warehouse_ids: Vec<i64>,
    pub article_id: Option<i64>,
    pub line_id: Option<i64>,
    pub only_with_stock: bool,
}

/// One row of an existence result. Recomputed wholesale on every query.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExistenceRow {
    pub article_id: i64,
    pub article_code: String,
    pub article_name: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: Decimal,
}

/// Client-facing totals over an existence result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ExistenceSummary {
    pub total_articles: u64,
    pub total_existence: Decimal,
    pub articles_without_stock: u64,
}

/// Pure aggregation over a query result: row count, total on-hand quantity,
/// and the number of zero-quantity rows.
pub fn summarize(rows: &[ExistenceRow]) -> ExistenceSummary {
    ExistenceSummary {
        total_articles: rows.len() as u64,
        total_existence: rows.iter().map(|row| row.quantity).sum(),
        articles_without_stock: rows
            .iter()
            .filter(|row| row.quantity == Decimal::ZERO)
            .count() as u64,
    }
}

#[derive(Clone)]
pub struct StockService {
    db: Arc<DbPool>,
}

impl StockService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Existence rows matching the filter, enriched with article and
    /// warehouse descriptions. `only_with_stock` excludes zero-quantity rows
    /// at the query layer; [`summarize`] never re-filters.
    #[instrument(skip(self))]
    pub async fn query(&self, filter: &ExistenceFilter) -> Result<Vec<ExistenceRow>, ServiceError> {
        let db = self.db.as_ref();

        let mut stock_query = ArticleStock::find();
        if !filter.warehouse_ids.is_empty() {
            stock_query = stock_query
                .filter(article_stock::Column::WarehouseId.is_in(filter.warehouse_ids.clone()));
        }
        if let Some(article_id) = filter.article_id {
            stock_query = stock_query.filter(article_stock::Column::ArticleId.eq(article_id));
        }
        if let Some(line_id) = filter.line_id {
            let line_articles: Vec<i64> = Article::find()
                .filter(article::Column::LineId.eq(line_id))
                .all(db)
                .await
                .map_err(ServiceError::db_error)?
                .into_iter()
                .map(|a| a.id)
                .collect();
            if line_articles.is_empty() {
                return Ok(Vec::new());
            }
            stock_query = stock_query.filter(article_stock::Column::ArticleId.is_in(line_articles));
        }
        if filter.only_with_stock {
            stock_query = stock_query.filter(article_stock::Column::Quantity.gt(Decimal::ZERO));
        }

        let stock_rows = stock_query.all(db).await.map_err(ServiceError::db_error)?;
        if stock_rows.is_empty() {
            return Ok(Vec::new());
        }

        let article_ids: Vec<i64> = stock_rows.iter().map(|row| row.article_id).collect();
        let warehouse_ids: Vec<i64> = stock_rows.iter().map(|row| row.warehouse_id).collect();

        let articles: HashMap<i64, article::Model> = Article::find()
            .filter(article::Column::Id.is_in(article_ids))
            .all(db)
            .await
            .map_err(ServiceError::db_error)?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let warehouses: HashMap<i64, warehouse::Model> = Warehouse::find()
            .filter(warehouse::Column::Id.is_in(warehouse_ids))
            .all(db)
            .await
            .map_err(ServiceError::db_error)?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        let mut rows = Vec::with_capacity(stock_rows.len());
        for stock in stock_rows {
            let article = articles.get(&stock.article_id).ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "stock row {} references missing article {}",
                    stock.id, stock.article_id
                ))
            })?;
            let warehouse = warehouses.get(&stock.warehouse_id).ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "stock row {} references missing warehouse {}",
                    stock.id, stock.warehouse_id
                ))
            })?;
            rows.push(ExistenceRow {
                article_id: stock.article_id,
                article_code: article.code.clone(),
                article_name: article.name.clone(),
                warehouse_id: stock.warehouse_id,
                warehouse_name: warehouse.name.clone(),
                quantity: stock.quantity,
            });
        }

        Ok(rows)
    }
}

/// Applies a signed quantity change to the (article, warehouse) stock row,
/// creating it when absent. Returns (previous, new) quantities. Existence
/// never goes below zero.
pub(crate) async fn apply_stock_delta<C: ConnectionTrait>(
    conn: &C,
    article_id: i64,
    warehouse_id: i64,
    delta: Decimal,
) -> Result<(Decimal, Decimal), ServiceError> {
    let existing = ArticleStock::find()
        .filter(article_stock::Column::ArticleId.eq(article_id))
        .filter(article_stock::Column::WarehouseId.eq(warehouse_id))
        .one(conn)
        .await
        .map_err(ServiceError::db_error)?;

    let previous = existing
        .as_ref()
        .map(|row| row.quantity)
        .unwrap_or(Decimal::ZERO);
    let new_quantity = previous + delta;
    if new_quantity < Decimal::ZERO {
        return Err(ServiceError::InsufficientStock(format!(
            "article {} in warehouse {}: on hand {}, requested change {}",
            article_id, warehouse_id, previous, delta
        )));
    }

    match existing {
        Some(row) => {
            let mut active: article_stock::ActiveModel = row.into();
            active.quantity = Set(new_quantity);
            active.updated_at = Set(Utc::now());
            active.update(conn).await.map_err(ServiceError::db_error)?;
        }
        None => {
            let row = article_stock::ActiveModel {
                article_id: Set(article_id),
                warehouse_id: Set(warehouse_id),
                quantity: Set(new_quantity),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            row.insert(conn).await.map_err(ServiceError::db_error)?;
        }
    }

    Ok((previous, new_quantity))
}
