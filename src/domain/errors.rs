//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Rejected at admission: an entry must be fixed before it reaches the list.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No grocery item with id {0}")]
    NotFound(Uuid),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Receipt scan failed: {0}")]
    Scanner(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Input error: {0}")]
    Input(String),
}
