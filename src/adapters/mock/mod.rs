//! Mock outbound adapters. Hardcoded responses with simulated latency;
//! a real backend replaces these behind the same ports.

pub mod auth;
pub mod scanner;

pub use auth::MockAuthAdapter;
pub use scanner::MockScannerAdapter;
