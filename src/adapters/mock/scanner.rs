//! Mock receipt scanner for running without an OCR backend.
//!
//! Validates the upload the way the product promises (image formats, 10MB
//! cap), then "scans" in ten progress ticks and returns a fixed set of
//! items with expiry dates relative to the scan day.

use crate::domain::{Category, DomainError, GroceryDraft};
use crate::ports::ScannerPort;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Accepted receipt image extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heif"];

/// Maximum receipt size in bytes (10MB).
const MAX_RECEIPT_BYTES: u64 = 10 * 1024 * 1024;

/// Progress steps reported per scan.
const PROGRESS_STEPS: u8 = 10;

/// Mock receipt scanner.
///
/// Reports progress in `PROGRESS_STEPS` ticks with a configurable per-tick
/// delay, then returns five predetermined items.
pub struct MockScannerAdapter {
    /// Simulated work per progress tick, in milliseconds.
    step_delay_ms: u64,
}

impl MockScannerAdapter {
    /// Create a new mock scanner with default tick delay (300ms).
    pub fn new() -> Self {
        Self { step_delay_ms: 300 }
    }

    /// Create a mock scanner with custom tick delay.
    pub fn with_step_delay(step_delay_ms: u64) -> Self {
        Self { step_delay_ms }
    }

    async fn validate(&self, source: &Path) -> Result<(), DomainError> {
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DomainError::Scanner(format!(
                "unsupported receipt format '{}' (use JPG, PNG or HEIF)",
                extension
            )));
        }

        let metadata = tokio::fs::metadata(source)
            .await
            .map_err(|e| DomainError::Scanner(format!("cannot read receipt image: {}", e)))?;
        if metadata.len() > MAX_RECEIPT_BYTES {
            return Err(DomainError::Scanner(
                "receipt image exceeds the 10MB limit".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MockScannerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ScannerPort for MockScannerAdapter {
    async fn scan(
        &self,
        source: &Path,
        progress: mpsc::Sender<u8>,
    ) -> Result<Vec<GroceryDraft>, DomainError> {
        self.validate(source).await?;

        info!(path = %source.display(), "[MOCK] Simulating receipt scan");

        let step = 100 / PROGRESS_STEPS;
        for tick in 1..=PROGRESS_STEPS {
            tokio::time::sleep(Duration::from_millis(self.step_delay_ms)).await;
            if progress.send(tick * step).await.is_err() {
                warn!("progress channel closed, continuing scan silently");
                break;
            }
        }

        Ok(scanned_items(Utc::now().date_naive()))
    }
}

/// The predetermined "extracted" items, dated relative to the scan day.
fn scanned_items(scan_date: NaiveDate) -> Vec<GroceryDraft> {
    let in_days = |d: i64| Some(scan_date + ChronoDuration::days(d));
    vec![
        GroceryDraft {
            name: "Milk".to_string(),
            expiry_date: in_days(5),
            quantity: 1,
            category: Some(Category::Dairy),
            notes: None,
            reminder_set: false,
        },
        GroceryDraft {
            name: "Eggs".to_string(),
            expiry_date: in_days(14),
            quantity: 12,
            category: Some(Category::Dairy),
            notes: None,
            reminder_set: false,
        },
        GroceryDraft {
            name: "Chicken Breast".to_string(),
            expiry_date: in_days(2),
            quantity: 1,
            category: Some(Category::Meat),
            notes: None,
            reminder_set: false,
        },
        GroceryDraft {
            name: "Spinach".to_string(),
            expiry_date: in_days(3),
            quantity: 1,
            category: Some(Category::Vegetables),
            notes: None,
            reminder_set: false,
        },
        GroceryDraft {
            name: "Sourdough Bread".to_string(),
            expiry_date: in_days(4),
            quantity: 1,
            category: Some(Category::Bakery),
            notes: None,
            reminder_set: false,
        },
    ]
}
