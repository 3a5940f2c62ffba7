//! Application error types.

use crate::db::DbError;
use study_core::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("database error: {0}")]
    Db(#[from] DbError),

    #[error("{0}")]
    Schedule(#[from] ScheduleError),

    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("card not found: {0}")]
    CardNotFound(i64),

    #[error("unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, LabError>;
