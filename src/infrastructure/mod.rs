pub mod config;
pub mod document_store;
pub mod registry;

pub use config::{AppConfig, ConfigError, CorsConfig, ServerConfig, StoreConfig};
pub use document_store::{
    InMemoryConnector, InMemoryDocumentStore, MongoConnector, MongoDocumentStore,
};
pub use registry::InMemoryConnectionRegistry;
