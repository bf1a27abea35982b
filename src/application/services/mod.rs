mod connection;
mod document;
mod statistics;

pub use connection::{ConnectionService, TestOutcome};
pub use document::DocumentService;
pub use statistics::StatisticsService;

use crate::domain::{ports::ConnectionRegistry, Connection, DomainError};

async fn resolve_connection(
    registry: &dyn ConnectionRegistry,
    connection_id: &str,
) -> Result<Connection, DomainError> {
    registry
        .get(connection_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Connection"))
}
