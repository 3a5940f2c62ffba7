//! Core types for the study engine.

use crate::error::{Result, ScheduleError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default ease factor for a freshly initialized item.
pub const DEFAULT_EASE: f64 = 2.5;
/// Lowest ease factor an item can reach.
pub const MIN_EASE: f64 = 1.3;
/// Highest ease factor an item can reach.
pub const MAX_EASE: f64 = 3.0;

/// Review status of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    New,
    Learning,
    Hard,
    Learned,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::New
    }
}

impl ReviewStatus {
    /// Get the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Hard => "hard",
            Self::Learned => "learned",
        }
    }
}

/// Recall quality for a graded review.
///
/// 0-2 count as a lapse, 3-5 as a successful recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    /// Lowest quality that counts as remembered.
    pub const PASSING: u8 = 3;
    pub const MAX: u8 = 5;

    /// Create a quality rating, rejecting anything outside 0-5.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(ScheduleError::InvalidQuality(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this rating counts as a successful recall.
    pub fn is_success(self) -> bool {
        self.0 >= Self::PASSING
    }
}

impl TryFrom<u8> for Quality {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Static flashcard content from the catalog, without scheduling data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub id: i64,
    pub topic: String,
    pub front: String,
    pub back: String,
}

/// A flashcard together with its spaced repetition state.
///
/// Serialized in the camelCase layout the progress store has always used,
/// so `next_review_at` and `last_reviewed_at` appear as `nextReview` and
/// `lastReviewed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: i64,
    pub topic: String,
    pub front: String,
    pub back: String,
    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    #[serde(rename = "nextReview", default)]
    pub next_review_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastReviewed", default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl ReviewItem {
    /// Strip the scheduling fields, leaving the catalog content.
    pub fn content(&self) -> CardContent {
        CardContent {
            id: self.id,
            topic: self.topic.clone(),
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }

    /// Check the numeric fields the scheduler relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.ease_factor.is_finite() {
            return Err(ScheduleError::InvalidEaseFactor(self.ease_factor));
        }
        Ok(())
    }
}

/// Status filter used when listing flashcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    All,
    Due,
    New,
    Learning,
    Hard,
    Learned,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::All
    }
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Due => "due",
            Self::New => "new",
            Self::Learning => "learning",
            Self::Hard => "hard",
            Self::Learned => "learned",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "due" => Some(Self::Due),
            "new" => Some(Self::New),
            "learning" => Some(Self::Learning),
            "hard" => Some(Self::Hard),
            "learned" => Some(Self::Learned),
            _ => None,
        }
    }

    /// The single status this filter selects, if it selects by status.
    pub fn status(&self) -> Option<ReviewStatus> {
        match self {
            Self::New => Some(ReviewStatus::New),
            Self::Learning => Some(ReviewStatus::Learning),
            Self::Hard => Some(ReviewStatus::Hard),
            Self::Learned => Some(ReviewStatus::Learned),
            Self::All | Self::Due => None,
        }
    }
}
