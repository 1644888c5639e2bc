//! Port for the identity collaborator.
//!
//! Sign-in produces a scoped [`Session`] value that callers pass explicitly
//! into use cases; there is no process-wide "logged in" flag. Reads work
//! with any live session; writes require an unexpired admin session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// What a session is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Read-only access to the public collections.
    Anonymous,
    /// Full CRUD access.
    Admin,
}

/// A scoped, expiring credential.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub kind: SessionKind,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Whether this session may mutate chamber data.
    pub fn can_write(&self) -> bool {
        self.kind == SessionKind::Admin && !self.is_expired()
    }
}

/// Errors from sign-in
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Auth token rejected: {0}")]
    TokenRejected(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Port for authenticating a session before reads or writes.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Anonymous read-only session.
    async fn sign_in_anonymous(&self) -> Result<Session, AuthError>;

    /// Session from a pre-issued auth token.
    async fn sign_in_with_token(&self, token: &str) -> Result<Session, AuthError>;

    /// Admin session from username/password credentials.
    async fn sign_in_admin(&self, username: &str, password: &str) -> Result<Session, AuthError>;
}
