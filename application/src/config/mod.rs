//! Application-level configuration types.
//!
//! Use cases receive only the slices they need; the raw TOML structure and
//! file discovery live in the infrastructure layer.

use chrono::Duration;

/// Identifies which deployment's data this process works against.
///
/// Every collection path in the store is scoped by this id, so separate
/// deployments never see each other's documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub tenant: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            tenant: "default-deployment".to_string(),
        }
    }
}

/// Admin credentials for the editing mode.
///
/// The defaults mirror the fixture credentials the chamber's staging site
/// shipped with; production deployments override them in config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

impl AdminCredentials {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// How long an issued session stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl_minutes: i64,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self { ttl_minutes: 60 }
    }
}

impl SessionPolicy {
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes)
    }
}
