use crate::{
    db::DbPool,
    entities::user_config::{self, Entity as UserConfig},
    errors::ServiceError,
    models::AdjustmentKind,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Result of the configuration probe for one user. Posting is blocked unless
/// both `has_config` and `has_terminal` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConfigStatus {
    pub has_config: bool,
    pub has_terminal: bool,
    pub allow_positive: bool,
    pub allow_negative: bool,
}

/// Read-only gate over per-user workflow configuration.
#[derive(Clone)]
pub struct ConfigurationService {
    db: Arc<DbPool>,
}

impl ConfigurationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Probe used on workflow entry. A transport or database failure is an
    /// error here, never an implicit "not blocked".
    #[instrument(skip(self))]
    pub async fn check(&self, user_id: i64) -> Result<ConfigStatus, ServiceError> {
        if user_id == 0 {
            return Err(ServiceError::InvalidInput("user id is required".into()));
        }

        let config = Self::find_for_user(self.db.as_ref(), user_id).await?;
        Ok(match config {
            None => ConfigStatus {
                has_config: false,
                has_terminal: false,
                allow_positive: false,
                allow_negative: false,
            },
            Some(config) => ConfigStatus {
                has_config: true,
                has_terminal: config.terminal_id.is_some(),
                allow_positive: config.allow_positive,
                allow_negative: config.allow_negative,
            },
        })
    }

    pub(crate) async fn find_for_user<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
    ) -> Result<Option<user_config::Model>, ServiceError> {
        UserConfig::find()
            .filter(user_config::Column::UserId.eq(user_id))
            .one(conn)
            .await
            .map_err(ServiceError::db_error)
    }

    /// Gate applied inside the submission transaction. Fails closed, naming
    /// the specific missing prerequisite(s), and checks the adjustment kind
    /// is enabled for the user.
    pub(crate) async fn ensure_can_post<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        kind: AdjustmentKind,
    ) -> Result<(user_config::Model, i64), ServiceError> {
        if user_id == 0 {
            return Err(ServiceError::InvalidInput("user id is required".into()));
        }

        let config = Self::find_for_user(conn, user_id).await?.ok_or_else(|| {
            ServiceError::Forbidden(format!(
                "user {} has no system configuration and no terminal assigned",
                user_id
            ))
        })?;

        let terminal_id = config.terminal_id.ok_or_else(|| {
            ServiceError::Forbidden(format!("user {} has no terminal assigned", user_id))
        })?;

        match kind {
            AdjustmentKind::Positive if !config.allow_positive => {
                return Err(ServiceError::Forbidden(format!(
                    "positive adjustments are not enabled for user {}",
                    user_id
                )))
            }
            AdjustmentKind::Negative if !config.allow_negative => {
                return Err(ServiceError::Forbidden(format!(
                    "negative adjustments are not enabled for user {}",
                    user_id
                )))
            }
            _ => {}
        }

        Ok((config, terminal_id))
    }
}
