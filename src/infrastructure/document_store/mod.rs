mod in_memory;
mod mongo;
pub mod query;
mod record;
#[cfg(test)]
pub mod testing;

pub use in_memory::{InMemoryConnector, InMemoryDocumentStore};
pub use mongo::{MongoConnector, MongoDocumentStore};
pub use record::record_to_json;
