use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use super::resolve_connection;
use crate::domain::{
    ports::{ConnectionRegistry, StoreConnector},
    Connection, ConnectionStatus, DomainError, NewConnection,
};

pub const CONNECTION_OK_MESSAGE: &str = "Connection successful";
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to MongoDB. Please verify your connection details.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub success: bool,
    pub message: String,
}

pub struct ConnectionService {
    registry: Arc<dyn ConnectionRegistry>,
    connector: Arc<dyn StoreConnector>,
}

impl ConnectionService {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            registry,
            connector,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Connection>, DomainError> {
        self.registry.list().await
    }

    #[instrument(skip(self, descriptor), fields(name = %descriptor.name))]
    pub async fn create(&self, descriptor: NewConnection) -> Result<Connection, DomainError> {
        let connection = self.registry.create(descriptor).await?;
        tracing::info!(connection_id = %connection.id, "connection registered");
        Ok(connection)
    }

    /// Registers every descriptor, stopping at the first invalid one.
    pub async fn register_all(
        &self,
        descriptors: impl IntoIterator<Item = NewConnection>,
    ) -> Result<Vec<Connection>, DomainError> {
        let mut registered = Vec::new();
        for descriptor in descriptors {
            registered.push(self.create(descriptor).await?);
        }
        Ok(registered)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        if self.registry.delete(id).await? {
            tracing::info!(connection_id = %id, "connection removed");
            Ok(())
        } else {
            Err(DomainError::not_found("Connection"))
        }
    }

    /// Pings the tenant's store and records the result as the connection
    /// status. Store failures become an unsuccessful outcome, not an error;
    /// only an unknown id fails the call.
    #[instrument(skip(self))]
    pub async fn test(&self, id: &str) -> Result<TestOutcome, DomainError> {
        let connection = resolve_connection(self.registry.as_ref(), id).await?;

        let reachable = match self.connector.connect(&connection).await {
            Ok(store) => store.ping().await,
            Err(e) => Err(e),
        };

        let (status, outcome) = match reachable {
            Ok(()) => (
                ConnectionStatus::Connected,
                TestOutcome {
                    success: true,
                    message: CONNECTION_OK_MESSAGE.to_string(),
                },
            ),
            Err(e) => {
                tracing::warn!(connection_id = %id, error = %e, "connection test failed");
                (
                    ConnectionStatus::Disconnected,
                    TestOutcome {
                        success: false,
                        message: CONNECTION_FAILED_MESSAGE.to_string(),
                    },
                )
            }
        };

        self.registry.update_status(id, status).await?;
        Ok(outcome)
    }
}
