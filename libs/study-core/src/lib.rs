//! Core study library for the fundamentals lab.
//!
//! Provides:
//! - SM-2 spaced repetition scheduling with hard/learned overrides
//! - Due-card selection and status queries
//! - Learner progress (XP, streaks, lessons, quizzes)
//! - Shared types (ReviewItem, ReviewStatus, Quality, etc.)

pub mod algorithm;
pub mod error;
pub mod progress;
pub mod queue;
pub mod types;

pub use algorithm::{get_algorithm, sm2::Sm2, SpacedRepetitionAlgorithm};
pub use error::{Result, ScheduleError};
pub use progress::{Level, Progress, QuizScore, TopicProgress};
pub use queue::{filter_by_status, is_due, select_due, StatusCounts};
pub use types::{CardContent, Quality, ReviewItem, ReviewStatus, StatusFilter};
