//! Application use cases. Orchestrate domain logic via ports.

pub mod auth_service;
pub mod pantry_service;
pub mod reminder_service;
pub mod scanner_service;

pub use auth_service::AuthService;
pub use pantry_service::PantryService;
pub use reminder_service::ReminderService;
pub use scanner_service::{ScanSummary, ScannerService};
