use std::sync::Arc;

use crate::application::{ConnectionService, DocumentService, StatisticsService};
use crate::domain::ports::{ConnectionRegistry, StoreConnector};
use crate::infrastructure::AppConfig;

/// Shared handler state, built once at startup. The registry it wraps is the
/// only state that outlives a request.
#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<ConnectionService>,
    pub documents: Arc<DocumentService>,
    pub statistics: Arc<StatisticsService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        registry: Arc<dyn ConnectionRegistry>,
        connector: Arc<dyn StoreConnector>,
    ) -> Self {
        let config = Arc::new(config);
        let documents = DocumentService::new(registry.clone(), connector.clone())
            .with_max_results(config.store.max_results);

        Self {
            connections: Arc::new(ConnectionService::new(registry.clone(), connector.clone())),
            documents: Arc::new(documents),
            statistics: Arc::new(StatisticsService::new(registry, connector)),
            config,
        }
    }
}
