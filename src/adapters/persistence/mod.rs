//! Persistence adapters.

pub mod session_json;

pub use session_json::SessionJson;
