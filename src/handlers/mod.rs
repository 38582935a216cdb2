pub mod adjustments;
pub mod articles;
pub mod catalogs;
pub mod stock;

use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub adjustments: Arc<crate::services::adjustments::AdjustmentService>,
    pub articles: Arc<crate::services::articles::ArticleService>,
    pub stock: Arc<crate::services::stock::StockService>,
    pub catalogs: Arc<crate::services::catalogs::CatalogService>,
    pub configuration: Arc<crate::services::configuration::ConfigurationService>,
    pub numbering: Arc<crate::services::numbering::NumberingService>,
}

impl AppServices {
    /// Build the service container shared by all handlers.
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let adjustments = Arc::new(crate::services::adjustments::AdjustmentService::new(
            db_pool.clone(),
            event_sender,
        ));
        let articles = Arc::new(crate::services::articles::ArticleService::new(
            db_pool.clone(),
        ));
        let stock = Arc::new(crate::services::stock::StockService::new(db_pool.clone()));
        let catalogs = Arc::new(crate::services::catalogs::CatalogService::new(
            db_pool.clone(),
        ));
        let configuration = Arc::new(crate::services::configuration::ConfigurationService::new(
            db_pool.clone(),
        ));
        let numbering = Arc::new(crate::services::numbering::NumberingService::new(db_pool));

        Self {
            adjustments,
            articles,
            stock,
            catalogs,
            configuration,
            numbering,
        }
    }
}
