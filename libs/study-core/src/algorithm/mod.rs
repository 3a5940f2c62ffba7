//! Spaced repetition scheduling.

pub mod sm2;

use crate::error::Result;
use crate::types::{CardContent, Quality, ReviewItem};
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
///
/// Every operation takes the current time from the caller and returns a new
/// item; the input is never modified.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Scheduling state for a card that has never been studied.
    fn initialize(&self, content: CardContent, now: DateTime<Utc>) -> ReviewItem;

    /// Apply a graded review.
    fn review(&self, item: &ReviewItem, quality: Quality, now: DateTime<Utc>) -> Result<ReviewItem>;

    /// Explicit "I don't know this" override.
    fn mark_hard(&self, item: &ReviewItem, now: DateTime<Utc>) -> ReviewItem;

    /// Explicit mastery override.
    fn mark_learned(&self, item: &ReviewItem, now: DateTime<Utc>) -> ReviewItem;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_sm2_by_name() {
        let algorithm = get_algorithm("sm2").expect("sm2 is registered");
        assert_eq!(algorithm.name(), "sm2");
    }

    #[test]
    fn unknown_algorithm_is_none() {
        assert!(get_algorithm("leitner").is_none());
    }
}
