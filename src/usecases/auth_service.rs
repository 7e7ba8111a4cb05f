//! Sign-in / sign-up flow. Delegates to the auth backend, persists the
//! resulting user through the session store.

use crate::domain::{Credentials, DomainError, SignUpDetails, User};
use crate::ports::{AuthPort, SessionStorePort};
use std::sync::Arc;
use tracing::info;

pub struct AuthService {
    auth: Arc<dyn AuthPort>,
    session: Arc<dyn SessionStorePort>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthPort>, session: Arc<dyn SessionStorePort>) -> Self {
        Self { auth, session }
    }

    /// Sign in and remember the session.
    pub async fn login(&self, credentials: Credentials) -> Result<User, DomainError> {
        let user = self.auth.login(&credentials).await?;
        self.session.save(&user).await?;
        info!(user_id = %user.id, email = %user.email, "signed in");
        Ok(user)
    }

    /// Register, sign in, and remember the session.
    pub async fn sign_up(&self, details: SignUpDetails) -> Result<User, DomainError> {
        let user = self.auth.sign_up(&details).await?;
        self.session.save(&user).await?;
        info!(user_id = %user.id, email = %user.email, "account created");
        Ok(user)
    }

    /// Restore a previously persisted session, if any.
    pub async fn current_user(&self) -> Result<Option<User>, DomainError> {
        self.session.load().await
    }

    /// Sign out and forget the session.
    pub async fn logout(&self) -> Result<(), DomainError> {
        self.session.clear().await?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    struct FakeAuth;

    #[async_trait::async_trait]
    impl AuthPort for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> Result<User, DomainError> {
            Ok(User {
                id: Uuid::new_v4(),
                name: "Demo User".into(),
                email: credentials.email.clone(),
                phone_number: None,
            })
        }

        async fn sign_up(&self, details: &SignUpDetails) -> Result<User, DomainError> {
            Ok(User {
                id: Uuid::new_v4(),
                name: details.name.clone(),
                email: details.email.clone(),
                phone_number: details.phone_number.clone(),
            })
        }
    }

    #[derive(Default)]
    struct FakeSession {
        user: Mutex<Option<User>>,
    }

    #[async_trait::async_trait]
    impl SessionStorePort for FakeSession {
        async fn load(&self) -> Result<Option<User>, DomainError> {
            Ok(self.user.lock().await.clone())
        }

        async fn save(&self, user: &User) -> Result<(), DomainError> {
            *self.user.lock().await = Some(user.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            *self.user.lock().await = None;
            Ok(())
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(FakeAuth), Arc::new(FakeSession::default()))
    }

    #[tokio::test]
    async fn login_persists_the_session() {
        let svc = service();
        assert!(svc.current_user().await.unwrap().is_none());
        let user = svc
            .login(Credentials {
                email: "demo@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        let restored = svc.current_user().await.unwrap().unwrap();
        assert_eq!(restored.email, user.email);
    }

    #[tokio::test]
    async fn sign_up_echoes_the_form_and_persists() {
        let svc = service();
        let user = svc
            .sign_up(SignUpDetails {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                password: "hunter2".into(),
                phone_number: Some("+1555".into()),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.phone_number.as_deref(), Some("+1555"));
        assert!(svc.current_user().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let svc = service();
        svc.login(Credentials {
            email: "demo@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
        svc.logout().await.unwrap();
        assert!(svc.current_user().await.unwrap().is_none());
    }
}
