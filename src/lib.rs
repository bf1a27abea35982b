//! Administrative backend for monitoring and editing documents held in
//! per-tenant MongoDB collections.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
