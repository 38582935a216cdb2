use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user workflow configuration. A user without a row has no configuration;
/// a row without `terminal_id` has no terminal. Both are required to post.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub terminal_id: Option<i64>,
    pub allow_positive: bool,
    pub allow_negative: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
