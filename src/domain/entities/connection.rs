use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const DEFAULT_COLLECTION: &str = "YOOZ_TRANSFORMED_ITEMS_DOCUMENTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

/// A registered tenant: one document store addressed by URI, database and collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub status: ConnectionStatus,
}

impl Connection {
    pub fn from_descriptor(descriptor: NewConnection, default_collection: &str) -> Self {
        let collection = descriptor
            .collection
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_collection.to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            name: descriptor.name,
            uri: descriptor.uri,
            database: descriptor.database,
            collection,
            status: ConnectionStatus::Disconnected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConnection {
    pub name: String,
    pub uri: String,
    pub database: String,
    #[serde(default)]
    pub collection: Option<String>,
}

impl NewConnection {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            database: database.into(),
            collection: None,
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("uri", &self.uri),
            ("database", &self.database),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}
