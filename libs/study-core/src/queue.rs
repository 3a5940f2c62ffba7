//! Due-card selection and status queries over a flashcard collection.

use crate::types::{ReviewItem, ReviewStatus, StatusFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an item should be reviewed at `now`.
///
/// Items without a scheduled review are always due.
pub fn is_due(item: &ReviewItem, now: DateTime<Utc>) -> bool {
    match item.next_review_at {
        Some(next) => next <= now,
        None => true,
    }
}

/// Select the items due at `now`, keeping their input order.
pub fn select_due(items: &[ReviewItem], now: DateTime<Utc>) -> Vec<&ReviewItem> {
    items.iter().filter(|item| is_due(item, now)).collect()
}

/// Select items matching a status filter, keeping their input order.
pub fn filter_by_status(
    items: &[ReviewItem],
    filter: StatusFilter,
    now: DateTime<Utc>,
) -> Vec<&ReviewItem> {
    match filter {
        StatusFilter::All => items.iter().collect(),
        StatusFilter::Due => select_due(items, now),
        other => {
            let status = other.status();
            items
                .iter()
                .filter(|item| Some(item.status) == status)
                .collect()
        }
    }
}

/// Number of cards in each status, plus how many are due.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub learning: usize,
    pub hard: usize,
    pub learned: usize,
}

impl StatusCounts {
    pub fn tally(items: &[ReviewItem], now: DateTime<Utc>) -> Self {
        let mut counts = Self {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            if is_due(item, now) {
                counts.due += 1;
            }
            match item.status {
                ReviewStatus::New => counts.new += 1,
                ReviewStatus::Learning => counts.learning += 1,
                ReviewStatus::Hard => counts.hard += 1,
                ReviewStatus::Learned => counts.learned += 1,
            }
        }
        counts
    }

    /// Count for a single filter.
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Due => self.due,
            StatusFilter::New => self.new,
            StatusFilter::Learning => self.learning,
            StatusFilter::Hard => self.hard,
            StatusFilter::Learned => self.learned,
        }
    }
}
