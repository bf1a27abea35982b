use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use std::time::Duration;

use super::query;
use super::record::{payload_to_bson, record_to_json};
use crate::domain::{
    ports::{DocumentStore, StoreConnector},
    Connection, DocumentFilter, DocumentStatus, DocumentType, DomainError,
};
use crate::infrastructure::config::StoreConfig;

/// Opens a fresh MongoDB client for every session.
pub struct MongoConnector {
    connect_timeout: Duration,
    server_selection_timeout: Duration,
}

impl MongoConnector {
    pub fn new(connect_timeout: Duration, server_selection_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            server_selection_timeout,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            Duration::from_secs(config.connect_timeout_seconds),
            Duration::from_secs(config.server_selection_timeout_seconds),
        )
    }
}

impl Default for MongoConnector {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    async fn connect(&self, connection: &Connection) -> Result<Box<dyn DocumentStore>, DomainError> {
        let mut options = ClientOptions::parse(&connection.uri)
            .await
            .map_err(|e| DomainError::external(format!("invalid connection uri: {e}")))?;
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client =
            Client::with_options(options).map_err(|e| DomainError::external(e.to_string()))?;
        let database = client.database(&connection.database);
        let collection = database.collection::<Document>(&connection.collection);

        tracing::debug!(
            connection_id = %connection.id,
            database = %connection.database,
            collection = %connection.collection,
            "mongodb session opened"
        );

        Ok(Box::new(MongoDocumentStore {
            client,
            database: connection.database.clone(),
            collection,
        }))
    }
}

pub struct MongoDocumentStore {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), DomainError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;
        Ok(())
    }

    async fn find(
        &self,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<serde_json::Value>, DomainError> {
        let cursor = self
            .collection
            .find(query::build_filter(filter))
            .limit(limit)
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let records: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(records.into_iter().map(record_to_json).collect())
    }

    async fn update_payload(
        &self,
        id: &str,
        payload: serde_json::Value,
        updated_at: &str,
    ) -> Result<bool, DomainError> {
        let payload = payload_to_bson(payload)?;

        let result = self
            .collection
            .update_one(query::id_filter(id), query::payload_update(payload, updated_at))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn count(&self, status: Option<DocumentStatus>) -> Result<u64, DomainError> {
        self.collection
            .count_documents(query::status_filter(status))
            .await
            .map_err(|e| DomainError::external(e.to_string()))
    }

    async fn count_by_status(
        &self,
        doc_type: DocumentType,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        let cursor = self
            .collection
            .aggregate(query::status_breakdown_pipeline(doc_type))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let groups: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(query::read_group_counts(groups))
    }
}

impl Drop for MongoDocumentStore {
    /// Shuts the session's client down in the background. Outside a runtime
    /// the client's own drop releases its connection pool.
    fn drop(&mut self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let client = self.client.clone();
        let database = std::mem::take(&mut self.database);
        handle.spawn(async move {
            client.shutdown().await;
            tracing::debug!(database = %database, "mongodb session closed");
        });
    }
}
