use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Numbering domain. `next_number` is the sequence value the next posted
/// document will take; allocation happens inside the submission transaction.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "terminals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub establishment_code: i32,
    pub point_code: i32,
    pub next_number: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
