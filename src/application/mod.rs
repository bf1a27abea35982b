//! Application layer - Use cases and orchestration.
//!
//! Services resolve a tenant through the connection registry, open one store
//! session for the duration of a call and close it on every exit path. They
//! depend on domain ports (traits) rather than concrete implementations.

pub mod services;

pub use services::{ConnectionService, DocumentService, TestOutcome, StatisticsService};
