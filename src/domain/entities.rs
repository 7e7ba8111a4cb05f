//! Domain entities. Pure data structures for the core business.
//!
//! No prompt/IO types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked grocery item. `expiry_date` is a calendar date; the time of day
/// an item goes off is not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub category: Option<Category>,
    pub notes: Option<String>,
    #[serde(default)]
    pub reminder_set: bool,
}

/// Form payload for adding or editing a grocery item. No id yet; the expiry
/// date may still be unpicked, which admission validation rejects.
#[derive(Debug, Clone, Default)]
pub struct GroceryDraft {
    pub name: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: u32,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub reminder_set: bool,
}

/// Closed set of grocery categories. Labels the form offers; anything else
/// falls back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fruits,
    Vegetables,
    Dairy,
    Meat,
    Seafood,
    Bakery,
    CannedGoods,
    FrozenFoods,
    PantryItems,
    Other,
}

impl Category {
    /// All categories in the order the form presents them.
    pub const ALL: [Category; 10] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Dairy,
        Category::Meat,
        Category::Seafood,
        Category::Bakery,
        Category::CannedGoods,
        Category::FrozenFoods,
        Category::PantryItems,
        Category::Other,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::Bakery => "Bakery",
            Category::CannedGoods => "Canned Goods",
            Category::FrozenFoods => "Frozen Foods",
            Category::PantryItems => "Pantry Items",
            Category::Other => "Other",
        }
    }

    /// Parse a label, case-insensitive. Unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Category {
        let needle = label.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .unwrap_or(Category::Other)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The signed-in user. The only object the product ever persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

/// Sign-in form payload.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form payload. Phone number is only used for SMS reminders.
#[derive(Debug, Clone)]
pub struct SignUpDetails {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
}

/// How a reminder reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMethod {
    Email,
    Sms,
    Both,
}

/// Reminder settings. Lead time is one of the fixed choices the form offers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReminderPreferences {
    /// Days before expiry a reminder should fire.
    pub days_before_expiry: u8,
    pub email_enabled: bool,
    pub sms_enabled: bool,
}

impl ReminderPreferences {
    /// Lead times the settings form offers, in days.
    pub const ALLOWED_LEAD_TIMES: [u8; 6] = [1, 2, 3, 5, 7, 14];

    /// Effective delivery method, or None when every channel is toggled off.
    pub fn method(&self) -> Option<NotificationMethod> {
        match (self.email_enabled, self.sms_enabled) {
            (true, true) => Some(NotificationMethod::Both),
            (true, false) => Some(NotificationMethod::Email),
            (false, true) => Some(NotificationMethod::Sms),
            (false, false) => None,
        }
    }
}

impl Default for ReminderPreferences {
    fn default() -> Self {
        Self {
            days_before_expiry: 3,
            email_enabled: true,
            sms_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), cat);
        }
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(Category::from_label("Condiments"), Category::Other);
        assert_eq!(Category::from_label(""), Category::Other);
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::from_label("canned goods"), Category::CannedGoods);
        assert_eq!(Category::from_label("  DAIRY "), Category::Dairy);
    }

    #[test]
    fn notification_method_from_toggles() {
        let mut prefs = ReminderPreferences::default();
        assert_eq!(prefs.method(), Some(NotificationMethod::Email));
        prefs.sms_enabled = true;
        assert_eq!(prefs.method(), Some(NotificationMethod::Both));
        prefs.email_enabled = false;
        assert_eq!(prefs.method(), Some(NotificationMethod::Sms));
        prefs.sms_enabled = false;
        assert_eq!(prefs.method(), None);
    }
}
