//! Posting and reversal of adjustment documents. Both run as single
//! transactions: gate, authoritative number allocation, header + line
//! persistence, and the stock effect either all land or none do.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{
        adjustment_line::{self, Entity as AdjustmentLine},
        inventory_adjustment::{self, Entity as InventoryAdjustment},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    metrics::{ADJUSTMENTS_POSTED, ADJUSTMENTS_REVERSED, ADJUSTMENT_FAILURES},
    models::{AdjustmentDraft, AdjustmentKind, DocumentNumber},
    services::{configuration::ConfigurationService, numbering::NumberingService, stock},
};

/// List filters for posted adjustments.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub branch_id: Option<i64>,
    pub currency_id: Option<i64>,
    /// Include line items in each result.
    pub detailed: bool,
}

/// A posted adjustment with its lines and printable document number.
#[derive(Debug, Clone)]
pub struct AdjustmentDetail {
    pub header: inventory_adjustment::Model,
    pub lines: Vec<adjustment_line::Model>,
    pub formatted_number: String,
}

pub struct AdjustmentService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl AdjustmentService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Posts a draft as one atomic document. On any failure the transaction
    /// rolls back whole, including the number allocation, so the caller can
    /// retry the same draft without risking a duplicate document number.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: AdjustmentDraft) -> Result<AdjustmentDetail, ServiceError> {
        let db = self.db.as_ref();

        let outcome = db
            .transaction::<_, (AdjustmentDetail, Vec<Event>), ServiceError>(move |txn| {
                Box::pin(async move {
                    let (_config, terminal_id) =
                        ConfigurationService::ensure_can_post(txn, draft.user_id, draft.kind)
                            .await?;

                    draft
                        .validate_for_submit()
                        .map_err(|e| ServiceError::ValidationError(e.to_string()))?;
                    if draft.exchange_rate < Decimal::ZERO {
                        return Err(ServiceError::ValidationError(
                            "exchange rate cannot be negative".into(),
                        ));
                    }

                    let (terminal, allocated) =
                        NumberingService::allocate_number(txn, terminal_id).await?;
                    if let Some(displayed) = draft.document_number() {
                        if displayed != allocated {
                            warn!(
                                displayed,
                                allocated,
                                terminal_id,
                                "displayed document number was stale; using allocated value"
                            );
                        }
                    }

                    let total = draft.total();
                    let header = inventory_adjustment::ActiveModel {
                        document_number: Set(allocated),
                        terminal_id: Set(terminal.id),
                        branch_id: Set(draft.branch_id),
                        warehouse_id: Set(draft.warehouse_id),
                        user_id: Set(draft.user_id),
                        currency_id: Set(draft.currency_id),
                        reason_id: Set(draft.reason_id),
                        kind: Set(draft.kind.to_string()),
                        document_date: Set(draft.document_date),
                        exchange_rate: Set(draft.exchange_rate),
                        observation: Set(draft.observation.clone()),
                        total: Set(total),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(ServiceError::db_error)?;

                    let sign = draft.kind.sign();
                    let mut lines = Vec::with_capacity(draft.lines().len());
                    let mut events = Vec::with_capacity(draft.lines().len() + 1);
                    for line in draft.lines() {
                        let saved = adjustment_line::ActiveModel {
                            adjustment_id: Set(header.id),
                            item_number: Set(line.item_number as i32),
                            article_id: Set(line.article_id),
                            quantity: Set(line.quantity),
                            unit_cost: Set(line.unit_cost),
                            line_total: Set(line.line_total()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                        let (previous, new_quantity) = stock::apply_stock_delta(
                            txn,
                            line.article_id,
                            draft.warehouse_id,
                            line.quantity * sign,
                        )
                        .await?;
                        events.push(Event::StockChanged {
                            article_id: line.article_id,
                            warehouse_id: draft.warehouse_id,
                            previous_quantity: previous,
                            new_quantity,
                            transaction_id: Uuid::new_v4(),
                        });
                        lines.push(saved);
                    }

                    let formatted_number =
                        DocumentNumber::from_terminal(&terminal, allocated).to_string();
                    events.insert(
                        0,
                        Event::AdjustmentCreated {
                            adjustment_id: header.id,
                            document_number: formatted_number.clone(),
                            warehouse_id: header.warehouse_id,
                            kind: header.kind.clone(),
                            line_count: lines.len(),
                            total,
                        },
                    );

                    Ok((
                        AdjustmentDetail {
                            header,
                            lines,
                            formatted_number,
                        },
                        events,
                    ))
                })
            })
            .await
            .map_err(unwrap_transaction_error);

        let (detail, events) = match outcome {
            Ok(value) => value,
            Err(err) => {
                ADJUSTMENT_FAILURES
                    .with_label_values(&[failure_label(&err)])
                    .inc();
                return Err(err);
            }
        };

        ADJUSTMENTS_POSTED.inc();
        info!(
            adjustment_id = detail.header.id,
            document_number = %detail.formatted_number,
            line_count = detail.lines.len(),
            total = %detail.header.total,
            "adjustment posted"
        );
        for event in events {
            self.event_sender
                .send(event)
                .await
                .map_err(ServiceError::EventError)?;
        }

        Ok(detail)
    }

    /// Full document with lines, ordered by item number.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<AdjustmentDetail, ServiceError> {
        let db = self.db.as_ref();
        let header = InventoryAdjustment::find_by_id(id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("adjustment {} not found", id)))?;

        let lines = AdjustmentLine::find()
            .filter(adjustment_line::Column::AdjustmentId.eq(id))
            .order_by_asc(adjustment_line::Column::ItemNumber)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let formatted_number = self.format_number(&header).await?;
        Ok(AdjustmentDetail {
            header,
            lines,
            formatted_number,
        })
    }

    /// Posted adjustments matching the filter, newest first. Lines are
    /// loaded only when `detailed` is set.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &AdjustmentFilter,
    ) -> Result<Vec<AdjustmentDetail>, ServiceError> {
        let db = self.db.as_ref();

        let mut query = InventoryAdjustment::find();
        if let Some(from) = filter.date_from {
            query = query.filter(inventory_adjustment::Column::DocumentDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(inventory_adjustment::Column::DocumentDate.lte(to));
        }
        if let Some(branch_id) = filter.branch_id {
            query = query.filter(inventory_adjustment::Column::BranchId.eq(branch_id));
        }
        if let Some(currency_id) = filter.currency_id {
            query = query.filter(inventory_adjustment::Column::CurrencyId.eq(currency_id));
        }

        let headers = query
            .order_by_desc(inventory_adjustment::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut results = Vec::with_capacity(headers.len());
        for header in headers {
            let lines = if filter.detailed {
                AdjustmentLine::find()
                    .filter(adjustment_line::Column::AdjustmentId.eq(header.id))
                    .order_by_asc(adjustment_line::Column::ItemNumber)
                    .all(db)
                    .await
                    .map_err(ServiceError::db_error)?
            } else {
                Vec::new()
            };
            let formatted_number = self.format_number(&header).await?;
            results.push(AdjustmentDetail {
                header,
                lines,
                formatted_number,
            });
        }

        Ok(results)
    }

    /// Irreversible reversal: physically undoes each line's stock effect,
    /// then deletes the document. One transaction; any failure leaves no
    /// partial state.
    #[instrument(skip(self))]
    pub async fn reverse(&self, id: i64) -> Result<(), ServiceError> {
        let db = self.db.as_ref();

        let outcome = db
            .transaction::<_, Vec<Event>, ServiceError>(move |txn| {
                Box::pin(async move {
                    let header = InventoryAdjustment::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("adjustment {} not found", id))
                        })?;

                    let kind: AdjustmentKind = header.kind.parse().map_err(|_| {
                        ServiceError::InternalError(format!(
                            "adjustment {} has unknown kind '{}'",
                            id, header.kind
                        ))
                    })?;

                    let lines = AdjustmentLine::find()
                        .filter(adjustment_line::Column::AdjustmentId.eq(id))
                        .order_by_asc(adjustment_line::Column::ItemNumber)
                        .all(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    // Opposite sign of the original posting
                    let sign = kind.sign() * Decimal::NEGATIVE_ONE;
                    let mut events = Vec::with_capacity(lines.len() + 1);
                    for line in &lines {
                        let (previous, new_quantity) = stock::apply_stock_delta(
                            txn,
                            line.article_id,
                            header.warehouse_id,
                            line.quantity * sign,
                        )
                        .await?;
                        events.push(Event::StockChanged {
                            article_id: line.article_id,
                            warehouse_id: header.warehouse_id,
                            previous_quantity: previous,
                            new_quantity,
                            transaction_id: Uuid::new_v4(),
                        });
                    }

                    AdjustmentLine::delete_many()
                        .filter(adjustment_line::Column::AdjustmentId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let terminal =
                        NumberingService::find_terminal(txn, header.terminal_id).await?;
                    let formatted =
                        DocumentNumber::from_terminal(&terminal, header.document_number)
                            .to_string();
                    let warehouse_id = header.warehouse_id;
                    header
                        .delete(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    events.insert(
                        0,
                        Event::AdjustmentReversed {
                            adjustment_id: id,
                            document_number: formatted,
                            warehouse_id,
                        },
                    );
                    Ok(events)
                })
            })
            .await
            .map_err(unwrap_transaction_error);

        let events = match outcome {
            Ok(events) => events,
            Err(err) => {
                ADJUSTMENT_FAILURES
                    .with_label_values(&[failure_label(&err)])
                    .inc();
                return Err(err);
            }
        };

        ADJUSTMENTS_REVERSED.inc();
        info!(adjustment_id = id, "adjustment reversed");
        for event in events {
            self.event_sender
                .send(event)
                .await
                .map_err(ServiceError::EventError)?;
        }

        Ok(())
    }

    async fn format_number(
        &self,
        header: &inventory_adjustment::Model,
    ) -> Result<String, ServiceError> {
        let terminal =
            NumberingService::find_terminal(self.db.as_ref(), header.terminal_id).await?;
        Ok(DocumentNumber::from_terminal(&terminal, header.document_number).to_string())
    }
}

fn unwrap_transaction_error(err: TransactionError<ServiceError>) -> ServiceError {
    match err {
        TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}

fn failure_label(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::ValidationError(_)
        | ServiceError::InvalidInput(_)
        | ServiceError::InvalidOperation(_)
        | ServiceError::BadRequest(_) => "validation_error",
        ServiceError::Forbidden(_) => "configuration_blocked",
        ServiceError::InsufficientStock(_) => "insufficient_stock",
        ServiceError::NotFound(_) => "not_found",
        ServiceError::DatabaseError(_) => "database_error",
        _ => "internal_error",
    }
}
