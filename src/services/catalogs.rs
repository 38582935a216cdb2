//! Flat catalog reads consumed as-is by the workflow: branches, warehouses
//! scoped to a branch, currencies, and adjustment reasons.

use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    db::DbPool,
    entities::{
        adjustment_reason::{self, Entity as AdjustmentReason},
        branch::{self, Entity as Branch},
        currency::{self, Entity as Currency},
        warehouse::{self, Entity as Warehouse},
    },
    errors::ServiceError,
};

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    pub async fn list_branches(&self) -> Result<Vec<branch::Model>, ServiceError> {
        Branch::find()
            .order_by_asc(branch::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Warehouses, optionally scoped to one branch. Selecting a branch in the
    /// workflow re-fetches through this with the branch filter set.
    pub async fn list_warehouses(
        &self,
        branch_id: Option<i64>,
    ) -> Result<Vec<warehouse::Model>, ServiceError> {
        let mut query = Warehouse::find().order_by_asc(warehouse::Column::Id);
        if let Some(branch_id) = branch_id {
            query = query.filter(warehouse::Column::BranchId.eq(branch_id));
        }
        query
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn list_currencies(&self) -> Result<Vec<currency::Model>, ServiceError> {
        Currency::find()
            .order_by_asc(currency::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn list_reasons(&self) -> Result<Vec<adjustment_reason::Model>, ServiceError> {
        AdjustmentReason::find()
            .order_by_asc(adjustment_reason::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }
}
