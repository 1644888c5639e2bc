//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application-layer
//! config slices use cases receive.

use duma_application::{AdminCredentials, DeploymentConfig, SessionPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Document store connection
    pub store: FileStoreConfig,
    /// Admin mode credentials and session policy
    pub admin: FileAdminConfig,
    /// Audit trail settings
    pub audit: FileAuditConfig,
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    ///
    /// Nothing here is fatal (the binary runs with defaults), but each
    /// warning flags a value that is almost certainly a mistake.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.store.tenant.trim().is_empty() {
            warnings.push("store.tenant is empty; falling back to the default deployment".into());
        }
        if self.store.base_url.trim().is_empty() {
            warnings.push("store.base_url is empty; the REST store adapter cannot connect".into());
        }
        if self.admin.session_ttl_minutes == 0 {
            warnings.push("admin.session_ttl_minutes is 0; every session expires immediately".into());
        }
        if self.store.poll_interval_secs == 0 {
            warnings.push("store.poll_interval_secs is 0; the change feed would spin".into());
        }
        warnings
    }

    pub fn to_deployment(&self) -> DeploymentConfig {
        if self.store.tenant.trim().is_empty() {
            DeploymentConfig::default()
        } else {
            DeploymentConfig {
                tenant: self.store.tenant.clone(),
            }
        }
    }

    pub fn to_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.admin.username.clone(),
            password: self.admin.password.clone(),
        }
    }

    pub fn to_session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            ttl_minutes: self.admin.session_ttl_minutes.max(1) as i64,
        }
    }
}

/// `[store]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Base URL of the hosted document database.
    pub base_url: String,
    /// Deployment (tenant) id scoping every collection path.
    pub tenant: String,
    /// Pre-issued auth token sent as a bearer credential, if any.
    pub auth_token: Option<String>,
    /// Change-feed polling interval.
    pub poll_interval_secs: u64,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8443".to_string(),
            tenant: "default-deployment".to_string(),
            auth_token: None,
            poll_interval_secs: 3,
        }
    }
}

/// `[admin]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdminConfig {
    pub username: String,
    pub password: String,
    pub session_ttl_minutes: u64,
}

impl Default for FileAdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
            session_ttl_minutes: 60,
        }
    }
}

/// `[audit]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Where to write the JSONL audit trail; `None` disables it.
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_credentials().username, "admin");
        assert_eq!(config.to_session_policy().ttl_minutes, 60);
    }

    #[test]
    fn test_empty_tenant_warns_and_falls_back() {
        let mut config = FileConfig::default();
        config.store.tenant = "  ".to_string();
        assert_eq!(config.validate().len(), 1);
        assert_eq!(config.to_deployment().tenant, "default-deployment");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [store]
            tenant = "duma-prod"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.tenant, "duma-prod");
        assert_eq!(config.store.poll_interval_secs, 3);
        assert_eq!(config.admin.username, "admin");
    }
}
