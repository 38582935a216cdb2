use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory article. `code` and `reference_code` participate in exact-match
/// resolution; `name` in partial matching.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub reference_code: Option<String>,
    pub name: String,
    pub line_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
