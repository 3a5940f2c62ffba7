//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with a bounded ease factor and explicit
//! hard/learned overrides alongside the graded review.

use super::SpacedRepetitionAlgorithm;
use crate::error::Result;
use crate::types::{
    CardContent, Quality, ReviewItem, ReviewStatus, DEFAULT_EASE, MAX_EASE, MIN_EASE,
};
use chrono::{DateTime, Duration, Utc};

/// Longest interval the scheduler will ever assign (about a century).
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    /// Interval after a lapse and after the first successful recall.
    pub first_interval: u32,
    /// Interval after the second consecutive successful recall.
    pub second_interval: u32,
    pub hard_penalty: f64,
    pub hard_interval: u32,
    pub learned_bonus: f64,
    pub learned_interval: u32,
    /// Upper bound on any scheduled interval, in days.
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE,
            minimum_ease: MIN_EASE,
            maximum_ease: MAX_EASE,
            first_interval: 1,
            second_interval: 6,
            hard_penalty: 0.2,
            hard_interval: 1,
            learned_bonus: 0.1,
            learned_interval: 30,
            maximum_interval: MAX_INTERVAL_DAYS,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initialize(&self, content: CardContent, now: DateTime<Utc>) -> ReviewItem {
        ReviewItem {
            id: content.id,
            topic: content.topic,
            front: content.front,
            back: content.back,
            ease_factor: self.initial_ease,
            interval: 0,
            repetitions: 0,
            next_review_at: Some(now),
            last_reviewed_at: None,
            status: ReviewStatus::New,
        }
    }

    fn review(&self, item: &ReviewItem, quality: Quality, now: DateTime<Utc>) -> Result<ReviewItem> {
        item.validate()?;

        let ease_factor = self.next_ease(item.ease_factor, quality);

        let (repetitions, interval, status) = if quality.is_success() {
            let repetitions = item.repetitions.saturating_add(1);
            let interval = match repetitions {
                1 => self.first_interval,
                2 => self.second_interval,
                // Grows from the interval the item had before this review.
                _ => self.grow_interval(item.interval, ease_factor),
            };
            (repetitions, interval, ReviewStatus::Learning)
        } else {
            (0, self.first_interval, ReviewStatus::Hard)
        };

        Ok(ReviewItem {
            ease_factor,
            interval,
            repetitions,
            next_review_at: Some(now + Duration::days(interval as i64)),
            last_reviewed_at: Some(now),
            status,
            ..item.clone()
        })
    }

    fn mark_hard(&self, item: &ReviewItem, now: DateTime<Utc>) -> ReviewItem {
        self.force(
            item,
            ReviewStatus::Hard,
            self.hard_interval,
            (item.ease_factor - self.hard_penalty).max(self.minimum_ease),
            now,
        )
    }

    fn mark_learned(&self, item: &ReviewItem, now: DateTime<Utc>) -> ReviewItem {
        self.force(
            item,
            ReviewStatus::Learned,
            self.learned_interval,
            (item.ease_factor + self.learned_bonus).min(self.maximum_ease),
            now,
        )
    }
}

impl Sm2 {
    /// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), kept in bounds.
    fn next_ease(&self, ease_factor: f64, quality: Quality) -> f64 {
        let miss = (Quality::MAX - quality.value()) as f64;
        let adjusted = ease_factor + (0.1 - miss * (0.08 + miss * 0.02));
        adjusted.clamp(self.minimum_ease, self.maximum_ease)
    }

    fn grow_interval(&self, interval: u32, ease_factor: f64) -> u32 {
        let grown = (interval as f64 * ease_factor).round();
        grown.clamp(1.0, self.maximum_interval as f64) as u32
    }

    fn force(
        &self,
        item: &ReviewItem,
        status: ReviewStatus,
        interval: u32,
        ease_factor: f64,
        now: DateTime<Utc>,
    ) -> ReviewItem {
        ReviewItem {
            status,
            interval,
            ease_factor: ease_factor.clamp(self.minimum_ease, self.maximum_ease),
            next_review_at: Some(now + Duration::days(interval as i64)),
            last_reviewed_at: Some(now),
            ..item.clone()
        }
    }
}
