mod connection;
mod document;
mod statistics;

pub use connection::{Connection, ConnectionStatus, NewConnection, DEFAULT_COLLECTION};
pub use document::{
    fields, Document, DocumentFilter, DocumentListing, DocumentStatus, DocumentType,
};
pub use statistics::{success_rate, Statistics, StatusBreakdown, StatusCounts};
