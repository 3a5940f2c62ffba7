//! Error types for study-core.

use thiserror::Error;

/// Result type alias using ScheduleError.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised when a caller hands the core values it cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("quality must be between 0 and 5, got {0}")]
    InvalidQuality(u8),

    #[error("ease factor must be a finite number, got {0}")]
    InvalidEaseFactor(f64),

    #[error("quiz must have at least one question")]
    InvalidQuizTotal,

    #[error("quiz score {score} exceeds total questions {total}")]
    QuizScoreOutOfRange { score: u32, total: u32 },
}
