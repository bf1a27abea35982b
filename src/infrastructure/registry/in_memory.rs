use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{
    ports::ConnectionRegistry, Connection, ConnectionStatus, DomainError, NewConnection,
    DEFAULT_COLLECTION,
};

/// Process-local tenant registry. Contents are lost on restart.
pub struct InMemoryConnectionRegistry {
    connections: RwLock<Vec<Connection>>,
    default_collection: String,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::with_default_collection(DEFAULT_COLLECTION)
    }

    pub fn with_default_collection(collection: impl Into<String>) -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
            default_collection: collection.into(),
        }
    }
}

impl Default for InMemoryConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn list(&self) -> Result<Vec<Connection>, DomainError> {
        let store = self
            .connections
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(store.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Connection>, DomainError> {
        let store = self
            .connections
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(store.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, descriptor: NewConnection) -> Result<Connection, DomainError> {
        descriptor.validate()?;
        let connection = Connection::from_descriptor(descriptor, &self.default_collection);

        let mut store = self
            .connections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        // v4 collisions are not expected, but ids must stay unique
        if store.iter().any(|c| c.id == connection.id) {
            return Err(DomainError::internal("connection id collision"));
        }
        store.push(connection.clone());
        Ok(connection)
    }

    async fn update_status(
        &self,
        id: &str,
        status: ConnectionStatus,
    ) -> Result<Option<Connection>, DomainError> {
        let mut store = self
            .connections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(store.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            c.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut store = self
            .connections
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let before = store.len();
        store.retain(|c| c.id != id);
        Ok(store.len() != before)
    }
}
