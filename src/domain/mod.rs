//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod expiry;

pub use entities::{
    Category, Credentials, GroceryDraft, GroceryItem, NotificationMethod, ReminderPreferences,
    SignUpDetails, User,
};
pub use errors::DomainError;
pub use expiry::{EvaluatedItem, ExpiryEvaluation, ExpiryStatus};
