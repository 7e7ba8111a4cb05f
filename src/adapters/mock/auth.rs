//! Mock auth backend for running without a server.
//!
//! Returns a demo user after a short simulated round-trip. Only shape-level
//! checks here; there is no account database to check against.

use crate::domain::{Credentials, DomainError, SignUpDetails, User};
use crate::ports::AuthPort;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Mock auth adapter.
///
/// Simulates network latency with a configurable delay.
pub struct MockAuthAdapter {
    /// Simulated round-trip in milliseconds.
    delay_ms: u64,
}

impl MockAuthAdapter {
    /// Create a new mock adapter with default delay (1000ms).
    pub fn new() -> Self {
        Self { delay_ms: 1000 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn simulate_round_trip(&self) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
    }
}

impl Default for MockAuthAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuthPort for MockAuthAdapter {
    async fn login(&self, credentials: &Credentials) -> Result<User, DomainError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(DomainError::Auth("email and password are required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::Auth("not a valid email address".into()));
        }

        info!(email, "[MOCK] Simulating sign-in");
        self.simulate_round_trip().await;

        Ok(User {
            id: Uuid::new_v4(),
            name: "Demo User".to_string(),
            email: email.to_string(),
            phone_number: None,
        })
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<User, DomainError> {
        let name = details.name.trim();
        let email = details.email.trim();
        if name.is_empty() {
            return Err(DomainError::Auth("name is required".into()));
        }
        if email.is_empty() || details.password.is_empty() {
            return Err(DomainError::Auth("email and password are required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::Auth("not a valid email address".into()));
        }

        info!(email, "[MOCK] Simulating account creation");
        self.simulate_round_trip().await;

        let phone_number = details
            .phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_returns_the_demo_user() {
        let adapter = MockAuthAdapter::with_delay(10);
        let user = adapter
            .login(&Credentials {
                email: "someone@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.email, "someone@example.com");
    }

    #[tokio::test]
    async fn login_rejects_blank_credentials() {
        let adapter = MockAuthAdapter::with_delay(10);
        let err = adapter
            .login(&Credentials {
                email: "  ".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }

    #[tokio::test]
    async fn login_rejects_malformed_email() {
        let adapter = MockAuthAdapter::with_delay(10);
        let err = adapter
            .login(&Credentials {
                email: "not-an-email".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(_)));
    }

    #[tokio::test]
    async fn sign_up_echoes_the_form_and_drops_blank_phone() {
        let adapter = MockAuthAdapter::with_delay(10);
        let user = adapter
            .sign_up(&SignUpDetails {
                name: " Ada ".into(),
                email: "ada@example.com".into(),
                password: "hunter2".into(),
                phone_number: Some("  ".into()),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.phone_number, None);
    }
}
