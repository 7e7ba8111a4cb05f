//! The grocery list: in-memory store with admission validation.
//!
//! Validation happens here, before anything reaches the expiry evaluator —
//! an item without an expiry date must never get that far. The list itself
//! lives only for the process; by product definition nothing durable exists
//! beyond the session file.

use crate::domain::expiry::{self, EvaluatedItem};
use crate::domain::{DomainError, GroceryDraft, GroceryItem};
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// In-memory grocery store. Insertion order is preserved; urgency ordering
/// is computed on demand.
#[derive(Default)]
pub struct PantryService {
    items: RwLock<Vec<GroceryItem>>,
}

impl PantryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and admit a new item. Returns the stored copy with its id.
    pub async fn add(&self, draft: GroceryDraft) -> Result<GroceryItem, DomainError> {
        let (name, expiry_date) = validate(&draft)?;
        let item = GroceryItem {
            id: Uuid::new_v4(),
            name,
            expiry_date,
            quantity: draft.quantity,
            category: draft.category,
            notes: normalize_notes(draft.notes),
            reminder_set: draft.reminder_set,
        };
        let mut items = self.items.write().await;
        items.push(item.clone());
        info!(id = %item.id, name = %item.name, expiry = %item.expiry_date, "grocery added");
        Ok(item)
    }

    /// Validate and apply an edit. The id stays stable for the item's lifetime.
    pub async fn update(&self, id: Uuid, draft: GroceryDraft) -> Result<GroceryItem, DomainError> {
        let (name, expiry_date) = validate(&draft)?;
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound(id))?;
        item.name = name;
        item.expiry_date = expiry_date;
        item.quantity = draft.quantity;
        item.category = draft.category;
        item.notes = normalize_notes(draft.notes);
        item.reminder_set = draft.reminder_set;
        let updated = item.clone();
        info!(id = %updated.id, name = %updated.name, "grocery updated");
        Ok(updated)
    }

    /// Remove an item. Returns the removed copy (the UI names it in the
    /// confirmation message).
    pub async fn remove(&self, id: Uuid) -> Result<GroceryItem, DomainError> {
        let mut items = self.items.write().await;
        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(DomainError::NotFound(id))?;
        let removed = items.remove(pos);
        info!(id = %removed.id, name = %removed.name, "grocery removed");
        Ok(removed)
    }

    /// Mark an item for a reminder.
    pub async fn set_reminder(&self, id: Uuid) -> Result<GroceryItem, DomainError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DomainError::NotFound(id))?;
        item.reminder_set = true;
        info!(id = %item.id, name = %item.name, "reminder set");
        Ok(item.clone())
    }

    /// Snapshot in insertion order.
    pub async fn items(&self) -> Vec<GroceryItem> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// The list as the UI shows it: stable urgency sort, each item paired
    /// with `{days_left, status}`. `now` comes from the caller so one
    /// rendering pass is internally consistent.
    pub async fn evaluated(&self, now: DateTime<Utc>) -> Vec<EvaluatedItem> {
        let items = self.items.read().await;
        expiry::evaluate_all(&items, now)
    }
}

/// Admission checks shared by add and update. An expiry-less or unnamed
/// entry is a form error, not an evaluator concern.
fn validate(draft: &GroceryDraft) -> Result<(String, NaiveDate), DomainError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation(
            "please enter a grocery name".into(),
        ));
    }
    let expiry_date = draft
        .expiry_date
        .ok_or_else(|| DomainError::Validation("please select an expiry date".into()))?;
    if draft.quantity < 1 {
        return Err(DomainError::Validation(
            "quantity must be at least 1".into(),
        ));
    }
    Ok((name.to_string(), expiry_date))
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.and_then(|n| {
        let trimmed = n.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ExpiryStatus};

    fn draft(name: &str, expiry: Option<NaiveDate>) -> GroceryDraft {
        GroceryDraft {
            name: name.to_string(),
            expiry_date: expiry,
            quantity: 1,
            category: None,
            notes: None,
            reminder_set: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn add_assigns_id_and_stores() {
        let pantry = PantryService::new();
        let item = pantry
            .add(draft("Milk", Some(date(2024, 1, 15))))
            .await
            .unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(pantry.len().await, 1);
        assert_eq!(pantry.items().await[0].id, item.id);
    }

    #[tokio::test]
    async fn add_rejects_blank_name() {
        let pantry = PantryService::new();
        let err = pantry
            .add(draft("   ", Some(date(2024, 1, 15))))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(pantry.is_empty().await);
    }

    #[tokio::test]
    async fn add_rejects_missing_expiry_date() {
        let pantry = PantryService::new();
        let err = pantry.add(draft("Milk", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn add_rejects_zero_quantity() {
        let pantry = PantryService::new();
        let mut d = draft("Milk", Some(date(2024, 1, 15)));
        d.quantity = 0;
        let err = pantry.add(d).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn add_trims_name_and_drops_blank_notes() {
        let pantry = PantryService::new();
        let mut d = draft("  Milk  ", Some(date(2024, 1, 15)));
        d.notes = Some("   ".to_string());
        let item = pantry.add(d).await.unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.notes, None);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let pantry = PantryService::new();
        let item = pantry
            .add(draft("Milk", Some(date(2024, 1, 15))))
            .await
            .unwrap();

        let mut edit = draft("Whole Milk", Some(date(2024, 1, 18)));
        edit.quantity = 2;
        edit.category = Some(Category::Dairy);
        let updated = pantry.update(item.id, edit).await.unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "Whole Milk");
        assert_eq!(updated.quantity, 2);
        assert_eq!(updated.category, Some(Category::Dairy));
        assert_eq!(pantry.len().await, 1);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let pantry = PantryService::new();
        let err = pantry
            .update(Uuid::new_v4(), draft("Milk", Some(date(2024, 1, 15))))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_deletes_and_reports_the_item() {
        let pantry = PantryService::new();
        let item = pantry
            .add(draft("Milk", Some(date(2024, 1, 15))))
            .await
            .unwrap();
        let removed = pantry.remove(item.id).await.unwrap();
        assert_eq!(removed.name, "Milk");
        assert!(pantry.is_empty().await);
        let err = pantry.remove(item.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn set_reminder_marks_the_item() {
        let pantry = PantryService::new();
        let item = pantry
            .add(draft("Milk", Some(date(2024, 1, 15))))
            .await
            .unwrap();
        assert!(!item.reminder_set);
        let updated = pantry.set_reminder(item.id).await.unwrap();
        assert!(updated.reminder_set);
        assert!(pantry.items().await[0].reminder_set);
    }

    #[tokio::test]
    async fn evaluated_is_sorted_and_classified() {
        let pantry = PantryService::new();
        pantry
            .add(draft("Fresh", Some(date(2024, 1, 20))))
            .await
            .unwrap();
        pantry
            .add(draft("Gone", Some(date(2024, 1, 8))))
            .await
            .unwrap();
        pantry
            .add(draft("Today", Some(date(2024, 1, 10))))
            .await
            .unwrap();

        let now = date(2024, 1, 10).and_hms_opt(9, 30, 0).unwrap().and_utc();
        let rows = pantry.evaluated(now).await;
        let names: Vec<&str> = rows.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, ["Gone", "Today", "Fresh"]);
        assert_eq!(rows[0].status(), ExpiryStatus::Expired);
        assert_eq!(rows[1].status(), ExpiryStatus::ExpiresToday);
        assert_eq!(rows[2].status(), ExpiryStatus::Fresh);
    }
}
