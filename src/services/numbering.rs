use crate::{
    db::DbPool,
    entities::terminal::{self, Entity as Terminal},
    errors::ServiceError,
    models::DocumentNumber,
    services::configuration::ConfigurationService,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Next sequence value for a terminal, as shown to the user before posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NextNumber {
    pub number: i64,
    pub formatted: String,
}

/// Issues terminal-scoped sequential document numbers.
#[derive(Clone)]
pub struct NumberingService {
    db: Arc<DbPool>,
}

impl NumberingService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Reads the next sequence value for the user's terminal without
    /// allocating it. The value is advisory display; the submission
    /// transaction performs the authoritative allocation.
    #[instrument(skip(self))]
    pub async fn peek_next_number(&self, user_id: i64) -> Result<NextNumber, ServiceError> {
        if user_id == 0 {
            return Err(ServiceError::InvalidInput("user id is required".into()));
        }

        let db = self.db.as_ref();
        let config = ConfigurationService::find_for_user(db, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidOperation(format!(
                    "user {} has no system configuration; cannot issue document numbers",
                    user_id
                ))
            })?;
        let terminal_id = config.terminal_id.ok_or_else(|| {
            ServiceError::InvalidOperation(format!(
                "user {} has no terminal assigned; cannot issue document numbers",
                user_id
            ))
        })?;

        let terminal = Self::find_terminal(db, terminal_id).await?;
        let number = terminal.next_number;
        Ok(NextNumber {
            number,
            formatted: DocumentNumber::from_terminal(&terminal, number).to_string(),
        })
    }

    pub(crate) async fn find_terminal<C: ConnectionTrait>(
        conn: &C,
        terminal_id: i64,
    ) -> Result<terminal::Model, ServiceError> {
        Terminal::find_by_id(terminal_id)
            .one(conn)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("terminal {} not found", terminal_id)))
    }

    /// Authoritative allocation: takes the terminal's current `next_number`
    /// and advances the sequence, all on the caller's transaction. The unique
    /// (terminal_id, document_number) index on posted documents backstops
    /// concurrent allocations: a collision fails the whole transaction.
    pub(crate) async fn allocate_number<C: ConnectionTrait>(
        conn: &C,
        terminal_id: i64,
    ) -> Result<(terminal::Model, i64), ServiceError> {
        let terminal = Self::find_terminal(conn, terminal_id).await?;
        let allocated = terminal.next_number;

        let mut active: terminal::ActiveModel = terminal.clone().into();
        active.next_number = Set(allocated + 1);
        active.update(conn).await.map_err(ServiceError::db_error)?;

        Ok((terminal, allocated))
    }
}
