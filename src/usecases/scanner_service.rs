//! Receipt import: scan -> drafts -> normal admission into the pantry.
//!
//! Scanned drafts get no special treatment; a draft the scanner produces
//! with a missing date or blank name is rejected exactly like a bad form
//! submission.

use crate::domain::DomainError;
use crate::ports::ScannerPort;
use crate::usecases::PantryService;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of one receipt import.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanSummary {
    pub items_added: usize,
    pub items_rejected: usize,
}

pub struct ScannerService {
    scanner: Arc<dyn ScannerPort>,
    pantry: Arc<PantryService>,
}

impl ScannerService {
    pub fn new(scanner: Arc<dyn ScannerPort>, pantry: Arc<PantryService>) -> Self {
        Self { scanner, pantry }
    }

    /// Scan `source` and admit every extracted draft into the pantry.
    /// Progress percentages stream through `progress` while the scan runs.
    pub async fn scan_and_import(
        &self,
        source: &Path,
        progress: mpsc::Sender<u8>,
    ) -> Result<ScanSummary, DomainError> {
        let drafts = self.scanner.scan(source, progress).await?;

        let mut summary = ScanSummary::default();
        for draft in drafts {
            let name = draft.name.clone();
            match self.pantry.add(draft).await {
                Ok(item) => {
                    debug!(id = %item.id, name = %item.name, "scanned item admitted");
                    summary.items_added += 1;
                }
                Err(DomainError::Validation(reason)) => {
                    warn!(name = %name, %reason, "scanned item rejected");
                    summary.items_rejected += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            added = summary.items_added,
            rejected = summary.items_rejected,
            "receipt import complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, GroceryDraft};
    use chrono::NaiveDate;

    struct FakeScanner {
        drafts: Vec<GroceryDraft>,
    }

    #[async_trait::async_trait]
    impl ScannerPort for FakeScanner {
        async fn scan(
            &self,
            _source: &Path,
            progress: mpsc::Sender<u8>,
        ) -> Result<Vec<GroceryDraft>, DomainError> {
            let _ = progress.send(100).await;
            Ok(self.drafts.clone())
        }
    }

    fn draft(name: &str, expiry: Option<NaiveDate>) -> GroceryDraft {
        GroceryDraft {
            name: name.to_string(),
            expiry_date: expiry,
            quantity: 1,
            category: Some(Category::Other),
            notes: None,
            reminder_set: false,
        }
    }

    #[tokio::test]
    async fn valid_drafts_are_admitted_and_bad_ones_counted() {
        let expiry = NaiveDate::from_ymd_opt(2024, 1, 15);
        let scanner = FakeScanner {
            drafts: vec![
                draft("Milk", expiry),
                draft("", expiry),      // blank name: rejected
                draft("Eggs", None),    // no date: rejected
                draft("Bread", expiry),
            ],
        };
        let pantry = Arc::new(PantryService::new());
        let service = ScannerService::new(Arc::new(scanner), Arc::clone(&pantry));

        let (tx, mut rx) = mpsc::channel(4);
        let summary = service
            .scan_and_import(Path::new("receipt.jpg"), tx)
            .await
            .unwrap();

        assert_eq!(summary.items_added, 2);
        assert_eq!(summary.items_rejected, 2);
        assert_eq!(pantry.len().await, 2);
        assert_eq!(rx.recv().await, Some(100));
    }

    #[tokio::test]
    async fn scanner_failure_propagates() {
        struct FailingScanner;

        #[async_trait::async_trait]
        impl ScannerPort for FailingScanner {
            async fn scan(
                &self,
                _source: &Path,
                _progress: mpsc::Sender<u8>,
            ) -> Result<Vec<GroceryDraft>, DomainError> {
                Err(DomainError::Scanner("unreadable image".into()))
            }
        }

        let pantry = Arc::new(PantryService::new());
        let service = ScannerService::new(Arc::new(FailingScanner), pantry);
        let (tx, _rx) = mpsc::channel(1);
        let err = service
            .scan_and_import(Path::new("receipt.jpg"), tx)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Scanner(_)));
    }
}
