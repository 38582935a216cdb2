use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Events emitted by the adjustment workflow after a transaction commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    AdjustmentCreated {
        adjustment_id: i64,
        document_number: String,
        warehouse_id: i64,
        kind: String,
        line_count: usize,
        total: Decimal,
    },
    AdjustmentReversed {
        adjustment_id: i64,
        document_number: String,
        warehouse_id: i64,
    },
    StockChanged {
        article_id: i64,
        warehouse_id: i64,
        previous_quantity: Decimal,
        new_quantity: Decimal,
        transaction_id: Uuid,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs for the lifetime of
/// the server task that spawned it.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::AdjustmentCreated {
                adjustment_id,
                document_number,
                warehouse_id,
                kind,
                line_count,
                total,
            } => info!(
                adjustment_id,
                %document_number,
                warehouse_id,
                %kind,
                line_count,
                %total,
                "adjustment posted"
            ),
            Event::AdjustmentReversed {
                adjustment_id,
                document_number,
                warehouse_id,
            } => info!(
                adjustment_id,
                %document_number, warehouse_id, "adjustment reversed"
            ),
            Event::StockChanged {
                article_id,
                warehouse_id,
                previous_quantity,
                new_quantity,
                transaction_id,
            } => info!(
                article_id,
                warehouse_id,
                %previous_quantity,
                %new_quantity,
                %transaction_id,
                "stock changed"
            ),
        }
    }
}
