//! Reminder settings and due-reminder computation.
//!
//! Preferences live in memory only; delivery (email/SMS) belongs to a
//! backend this product does not have. What we can do locally is answer
//! "which items should fire a reminder right now".

use crate::domain::expiry::EvaluatedItem;
use crate::domain::{DomainError, ReminderPreferences};
use crate::usecases::PantryService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub struct ReminderService {
    pantry: Arc<PantryService>,
    prefs: RwLock<ReminderPreferences>,
}

impl ReminderService {
    pub fn new(pantry: Arc<PantryService>) -> Self {
        Self {
            pantry,
            prefs: RwLock::new(ReminderPreferences::default()),
        }
    }

    pub async fn preferences(&self) -> ReminderPreferences {
        *self.prefs.read().await
    }

    /// Validate and store new preferences. The lead time must be one of the
    /// fixed choices the form offers.
    pub async fn save(
        &self,
        prefs: ReminderPreferences,
    ) -> Result<ReminderPreferences, DomainError> {
        if !ReminderPreferences::ALLOWED_LEAD_TIMES.contains(&prefs.days_before_expiry) {
            return Err(DomainError::Validation(format!(
                "unsupported reminder lead time: {} days",
                prefs.days_before_expiry
            )));
        }
        *self.prefs.write().await = prefs;
        info!(
            days_before = prefs.days_before_expiry,
            email = prefs.email_enabled,
            sms = prefs.sms_enabled,
            "reminder preferences saved"
        );
        Ok(prefs)
    }

    /// Items whose reminder should fire now: reminder set, not yet expired,
    /// and inside the configured lead window. Already sorted by urgency.
    pub async fn due_items(&self, now: DateTime<Utc>) -> Vec<EvaluatedItem> {
        let lead = i64::from(self.prefs.read().await.days_before_expiry);
        self.pantry
            .evaluated(now)
            .await
            .into_iter()
            .filter(|row| {
                row.item.reminder_set && row.days_left() >= 0 && row.days_left() <= lead
            })
            .collect()
    }
}
