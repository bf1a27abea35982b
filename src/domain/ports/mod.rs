mod connection_registry;
mod document_store;

pub use connection_registry::ConnectionRegistry;
pub use document_store::{DocumentStore, StoreConnector};
