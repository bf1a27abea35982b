use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::{
    fields,
    ports::{DocumentStore, StoreConnector},
    Connection, DocumentFilter, DocumentStatus, DocumentType, DomainError,
};

type Records = Arc<RwLock<Vec<Value>>>;

/// Connector over process-local collections, addressed by `memory://` URIs.
/// Any other URI is treated as unreachable.
pub struct InMemoryConnector {
    collections: RwLock<HashMap<(String, String), Records>>,
}

impl InMemoryConnector {
    pub const SCHEME: &'static str = "memory://";

    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Replaces the records of `database.collection`.
    pub fn seed(&self, database: &str, collection: &str, records: Vec<Value>) {
        let records = Arc::new(RwLock::new(records));
        if let Ok(mut collections) = self.collections.write() {
            collections.insert((database.to_string(), collection.to_string()), records);
        }
    }

    pub fn records(&self, database: &str, collection: &str) -> Vec<Value> {
        self.collections
            .read()
            .ok()
            .and_then(|c| c.get(&(database.to_string(), collection.to_string())).cloned())
            .and_then(|records| records.read().ok().map(|r| r.clone()))
            .unwrap_or_default()
    }

    fn collection(&self, database: &str, collection: &str) -> Result<Records, DomainError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(collections
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .clone())
    }
}

impl Default for InMemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    async fn connect(&self, connection: &Connection) -> Result<Box<dyn DocumentStore>, DomainError> {
        if !connection.uri.starts_with(Self::SCHEME) {
            return Err(DomainError::external(format!(
                "no in-memory store behind connection {}",
                connection.id
            )));
        }
        let records = self.collection(&connection.database, &connection.collection)?;
        Ok(Box::new(InMemoryDocumentStore { records }))
    }
}

pub struct InMemoryDocumentStore {
    records: Records,
}

impl InMemoryDocumentStore {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

fn str_at<'a>(record: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(record, |value, key| value.get(key))?
        .as_str()
}

fn matches(filter: &DocumentFilter, record: &Value) -> bool {
    if !filter.types.is_empty() {
        let doc_type = str_at(record, fields::TYPE);
        if !filter.types.iter().any(|t| Some(t.as_str()) == doc_type) {
            return false;
        }
    }

    if !filter.statuses.is_empty() {
        let status = str_at(record, fields::STATUS);
        if !filter.statuses.iter().any(|s| Some(s.as_str()) == status) {
            return false;
        }
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        let found = fields::SEARCHABLE.iter().any(|field| {
            str_at(record, field).is_some_and(|v| v.to_lowercase().contains(&needle))
        });
        if !found {
            return false;
        }
    }

    if filter.date_from.is_some() || filter.date_to.is_some() {
        let Some(updated) = str_at(record, fields::LAST_UPDATED) else {
            return false;
        };
        if filter.date_from.as_deref().is_some_and(|from| updated < from) {
            return false;
        }
        if filter.date_to.as_deref().is_some_and(|to| updated > to) {
            return false;
        }
    }

    true
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find(
        &self,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Value>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(store
            .iter()
            .filter(|r| matches(filter, r))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_payload(
        &self,
        id: &str,
        payload: Value,
        updated_at: &str,
    ) -> Result<bool, DomainError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let Some(record) = store
            .iter_mut()
            .find(|r| str_at(r, fields::ID) == Some(id))
        else {
            return Ok(false);
        };

        if let Some(object) = record.as_object_mut() {
            object.insert(fields::PAYLOAD.to_string(), payload);
            object.insert(
                fields::LAST_UPDATED.to_string(),
                Value::String(updated_at.to_string()),
            );
        }
        Ok(true)
    }

    async fn count(&self, status: Option<DocumentStatus>) -> Result<u64, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let count = match status {
            Some(status) => store
                .iter()
                .filter(|r| str_at(r, fields::STATUS) == Some(status.as_str()))
                .count(),
            None => store.len(),
        };
        Ok(count as u64)
    }

    async fn count_by_status(
        &self,
        doc_type: DocumentType,
    ) -> Result<Vec<(String, u64)>, DomainError> {
        let store = self
            .records
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut groups: Vec<(String, u64)> = Vec::new();
        for record in store
            .iter()
            .filter(|r| str_at(r, fields::TYPE) == Some(doc_type.as_str()))
        {
            let Some(status) = str_at(record, fields::STATUS) else {
                continue;
            };
            match groups.iter_mut().find(|(s, _)| s == status) {
                Some((_, count)) => *count += 1,
                None => groups.push((status.to_string(), 1)),
            }
        }
        Ok(groups)
    }
}
