use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::instrument;

use super::resolve_connection;
use crate::domain::{
    ports::{ConnectionRegistry, StoreConnector},
    DocumentFilter, DocumentListing, DomainError,
};

pub const DEFAULT_MAX_RESULTS: i64 = 1000;

pub struct DocumentService {
    registry: Arc<dyn ConnectionRegistry>,
    connector: Arc<dyn StoreConnector>,
    max_results: i64,
}

impl DocumentService {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            registry,
            connector,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    /// Lists the tenant's documents matching `filter`, capped at the
    /// configured maximum. Records that do not fit the document shape are
    /// left out and counted in [`DocumentListing::dropped`].
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        connection_id: &str,
        filter: &DocumentFilter,
    ) -> Result<DocumentListing, DomainError> {
        let connection = resolve_connection(self.registry.as_ref(), connection_id).await?;

        let store = self.connector.connect(&connection).await?;
        let records = store.find(filter, self.max_results).await?;

        let listing = DocumentListing::from_records(records);
        if listing.dropped > 0 {
            tracing::warn!(
                connection_id,
                dropped = listing.dropped,
                "records excluded from listing by document validation"
            );
        }
        Ok(listing)
    }

    /// Replaces the payload of one document and stamps it with the current time.
    #[instrument(skip(self, payload))]
    pub async fn update_payload(
        &self,
        connection_id: &str,
        document_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError> {
        let connection = resolve_connection(self.registry.as_ref(), connection_id).await?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let store = self.connector.connect(&connection).await?;
        let matched = store.update_payload(document_id, payload, &updated_at).await?;

        if matched {
            tracing::info!(connection_id, document_id, "document payload updated");
            Ok(())
        } else {
            Err(DomainError::not_found("Document"))
        }
    }
}
