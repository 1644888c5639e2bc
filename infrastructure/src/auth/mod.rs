//! Identity adapter.
//!
//! Sessions are minted locally from configured secrets: admin credentials
//! come from the `[admin]` config section (the chamber's fixture-credential
//! admin mode) and the service token, when set, lets deployment tooling sign
//! in without a password. Every session carries an explicit expiry; there
//! is no ambient "logged in" state anywhere in the process.

use async_trait::async_trait;
use chrono::Utc;
use duma_application::ports::identity::{AuthError, IdentityGateway, Session, SessionKind};
use duma_application::{AdminCredentials, SessionPolicy};

/// Identity gateway backed by configured credentials.
pub struct ConfiguredIdentityGateway {
    credentials: AdminCredentials,
    policy: SessionPolicy,
    service_token: Option<String>,
}

impl ConfiguredIdentityGateway {
    pub fn new(credentials: AdminCredentials, policy: SessionPolicy) -> Self {
        Self {
            credentials,
            policy,
            service_token: None,
        }
    }

    pub fn with_service_token(mut self, token: impl Into<String>) -> Self {
        self.service_token = Some(token.into());
        self
    }

    fn session(&self, user_id: String, kind: SessionKind) -> Session {
        Session {
            user_id,
            kind,
            expires_at: Utc::now() + self.policy.ttl(),
        }
    }
}

#[async_trait]
impl IdentityGateway for ConfiguredIdentityGateway {
    async fn sign_in_anonymous(&self) -> Result<Session, AuthError> {
        let user_id = format!("anon-{}", Utc::now().timestamp_millis());
        Ok(self.session(user_id, SessionKind::Anonymous))
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<Session, AuthError> {
        match &self.service_token {
            Some(expected) if expected == token => {
                Ok(self.session("service".to_string(), SessionKind::Admin))
            }
            Some(_) => Err(AuthError::TokenRejected("token mismatch".to_string())),
            None => Err(AuthError::TokenRejected(
                "no service token configured".to_string(),
            )),
        }
    }

    async fn sign_in_admin(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if self.credentials.verify(username, password) {
            Ok(self.session(username.to_string(), SessionKind::Admin))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
