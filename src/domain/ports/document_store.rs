use async_trait::async_trait;

use crate::domain::{
    errors::DomainError, Connection, DocumentFilter, DocumentStatus, DocumentType,
};

/// A session against one tenant collection, opened per request.
///
/// A session releases its resources when dropped, so it is closed on every
/// exit path: success, error, or cancellation of the request future.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;

    /// Raw records matching `filter`, at most `limit`, in the store's natural
    /// order. The `_id` of every record is rendered as a string.
    async fn find(
        &self,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<serde_json::Value>, DomainError>;

    /// Overwrites payload and last-updated timestamp. Returns false when no
    /// record has the given id.
    async fn update_payload(
        &self,
        id: &str,
        payload: serde_json::Value,
        updated_at: &str,
    ) -> Result<bool, DomainError>;

    async fn count(&self, status: Option<DocumentStatus>) -> Result<u64, DomainError>;

    /// `(status, count)` pairs for every status present among documents of `doc_type`.
    async fn count_by_status(
        &self,
        doc_type: DocumentType,
    ) -> Result<Vec<(String, u64)>, DomainError>;
}

#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, connection: &Connection) -> Result<Box<dyn DocumentStore>, DomainError>;
}
