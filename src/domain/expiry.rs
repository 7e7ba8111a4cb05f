//! Expiry evaluation: day-count, urgency tiers, and urgency ordering.
//!
//! Everything here is pure. "Now" is always supplied by the caller so that
//! every item in one rendering pass is judged against the same instant and
//! the whole module stays deterministic under test.

use crate::domain::entities::GroceryItem;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in a whole day.
const MS_PER_DAY: i64 = 86_400_000;

/// Signed day-count between two instants. Partial days round up, so a 1-hour
/// gap counts as a full day of difference. The sign alone tells expired from
/// not: strictly-future expiries are positive, everything else (including an
/// expiry at exactly `now`) is zero or negative.
pub fn days_left(now: DateTime<Utc>, expiry: DateTime<Utc>) -> i64 {
    let diff_ms = (expiry - now).num_milliseconds().abs();
    let diff_days = (diff_ms + MS_PER_DAY - 1) / MS_PER_DAY;
    if expiry > now { diff_days } else { -diff_days }
}

/// Day-count between two calendar dates, evaluated midnight-to-midnight in
/// UTC. Keeps "expires today" reachable no matter the caller's time of day.
pub fn days_left_between(today: NaiveDate, expiry: NaiveDate) -> i64 {
    days_left(at_utc_midnight(today), at_utc_midnight(expiry))
}

fn at_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Urgency tier derived from a signed day-count. Tiers partition the integer
/// line; the presentation layer maps each tier to a color/icon pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiresToday,
    Critical,
    Warning,
    Fresh,
}

impl ExpiryStatus {
    /// Tier boundaries, first match wins. The inclusivity (`<= 2`, `<= 5`)
    /// is part of the contract.
    pub fn classify(days_left: i64) -> ExpiryStatus {
        match days_left {
            d if d < 0 => ExpiryStatus::Expired,
            0 => ExpiryStatus::ExpiresToday,
            1..=2 => ExpiryStatus::Critical,
            3..=5 => ExpiryStatus::Warning,
            _ => ExpiryStatus::Fresh,
        }
    }
}

/// Per-item view model: day-count plus the tier derived from it. Recomputed
/// on every pass, never cached — "now" moves continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryEvaluation {
    pub days_left: i64,
    pub status: ExpiryStatus,
}

impl ExpiryEvaluation {
    pub fn of(expiry_date: NaiveDate, now: DateTime<Utc>) -> ExpiryEvaluation {
        let days_left = days_left_between(now.date_naive(), expiry_date);
        ExpiryEvaluation {
            days_left,
            status: ExpiryStatus::classify(days_left),
        }
    }
}

/// A grocery item with its evaluation. What the presentation layer renders.
#[derive(Debug, Clone)]
pub struct EvaluatedItem {
    pub item: GroceryItem,
    pub evaluation: ExpiryEvaluation,
}

impl EvaluatedItem {
    pub fn days_left(&self) -> i64 {
        self.evaluation.days_left
    }

    pub fn status(&self) -> ExpiryStatus {
        self.evaluation.status
    }
}

/// Copy of `items` ordered by urgency: most-expired first, freshest last.
/// The sort is stable, so equal day-counts keep their input order. Input is
/// never mutated.
pub fn sort_by_urgency(items: &[GroceryItem], now: DateTime<Utc>) -> Vec<GroceryItem> {
    let today = now.date_naive();
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| days_left_between(today, item.expiry_date));
    sorted
}

/// Evaluate and order a list in one pass: stable urgency sort, each item
/// paired with its `{days_left, status}` view model.
pub fn evaluate_all(items: &[GroceryItem], now: DateTime<Utc>) -> Vec<EvaluatedItem> {
    let mut rows: Vec<EvaluatedItem> = items
        .iter()
        .map(|item| EvaluatedItem {
            item: item.clone(),
            evaluation: ExpiryEvaluation::of(item.expiry_date, now),
        })
        .collect();
    rows.sort_by_key(|row| row.days_left());
    rows
}
