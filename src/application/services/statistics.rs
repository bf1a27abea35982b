use std::sync::Arc;
use tracing::instrument;

use super::resolve_connection;
use crate::domain::{
    ports::{ConnectionRegistry, DocumentStore, StoreConnector},
    DocumentStatus, DocumentType, DomainError, Statistics, StatusBreakdown, StatusCounts,
};

pub struct StatisticsService {
    registry: Arc<dyn ConnectionRegistry>,
    connector: Arc<dyn StoreConnector>,
}

impl StatisticsService {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            registry,
            connector,
        }
    }

    #[instrument(skip(self))]
    pub async fn summarize(&self, connection_id: &str) -> Result<Statistics, DomainError> {
        let connection = resolve_connection(self.registry.as_ref(), connection_id).await?;

        let store = self.connector.connect(&connection).await?;
        Self::gather(store.as_ref()).await
    }

    /// Issues every count concurrently; any failure fails the whole summary.
    async fn gather(store: &dyn DocumentStore) -> Result<Statistics, DomainError> {
        let (total, loaded, failed, open, invoices, credit_notes) = tokio::try_join!(
            store.count(None),
            store.count(Some(DocumentStatus::Loaded)),
            store.count(Some(DocumentStatus::Failed)),
            store.count(Some(DocumentStatus::Open)),
            store.count_by_status(DocumentType::PurchaseInvoices),
            store.count_by_status(DocumentType::PurchaseCreditNotes),
        )?;

        let breakdown = |groups: Vec<(String, u64)>| {
            StatusBreakdown::from_groups(groups.iter().map(|(s, n)| (s.as_str(), *n)))
        };

        Ok(Statistics::new(
            StatusCounts {
                total,
                loaded,
                failed,
                open,
            },
            breakdown(invoices),
            breakdown(credit_notes),
        ))
    }
}
