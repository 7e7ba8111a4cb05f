//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. Every backend here is a mock today; the traits
//! are the seam where a real service replaces the simulation.

use crate::domain::{Credentials, DomainError, GroceryDraft, SignUpDetails, User};
use tokio::sync::mpsc;

/// Authentication backend. Exchanges form payloads for a signed-in user.
#[async_trait::async_trait]
pub trait AuthPort: Send + Sync {
    /// Sign an existing user in.
    async fn login(&self, credentials: &Credentials) -> Result<User, DomainError>;

    /// Register a new account and sign it in.
    async fn sign_up(&self, details: &SignUpDetails) -> Result<User, DomainError>;
}

/// Receipt scanner. Extracts grocery drafts from a receipt image.
#[async_trait::async_trait]
pub trait ScannerPort: Send + Sync {
    /// Scan the image at `source`. Reports percent-complete through
    /// `progress` (a closed receiver is not an error; scanning continues).
    /// Returned drafts still go through normal admission validation.
    async fn scan(
        &self,
        source: &std::path::Path,
        progress: mpsc::Sender<u8>,
    ) -> Result<Vec<GroceryDraft>, DomainError>;
}

/// Session store. Holds the signed-in user between runs; the only durable
/// state in the product.
#[async_trait::async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load the persisted user, if any.
    async fn load(&self) -> Result<Option<User>, DomainError>;

    /// Persist the signed-in user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Forget the persisted user.
    async fn clear(&self) -> Result<(), DomainError>;
}
