use async_trait::async_trait;

use crate::domain::{errors::DomainError, Connection, ConnectionStatus, NewConnection};

#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    async fn list(&self) -> Result<Vec<Connection>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Connection>, DomainError>;
    async fn create(&self, descriptor: NewConnection) -> Result<Connection, DomainError>;
    async fn update_status(
        &self,
        id: &str,
        status: ConnectionStatus,
    ) -> Result<Option<Connection>, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
