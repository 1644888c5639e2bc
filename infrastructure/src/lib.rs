//! Infrastructure layer for duma-register
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the hosted document store (REST) and its in-memory
//! stand-in, the configured identity gateway, the JSONL audit log, and
//! configuration file loading.

pub mod auth;
pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use auth::ConfiguredIdentityGateway;
pub use config::{ConfigLoader, FileAdminConfig, FileAuditConfig, FileConfig, FileStoreConfig};
pub use logging::JsonlAuditLog;
pub use store::{MemoryDocumentStore, RestDocumentStore};
