use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Posted adjustment document header. `(terminal_id, document_number)` is
/// unique; `kind` holds the POSITIVE/NEGATIVE stock sign.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_adjustments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub document_number: i64,
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
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
