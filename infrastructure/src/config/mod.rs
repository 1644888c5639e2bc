//! Configuration loading for the duma-register binary.

mod file_config;
mod loader;

pub use file_config::{FileAdminConfig, FileAuditConfig, FileConfig, FileStoreConfig};
pub use loader::ConfigLoader;
