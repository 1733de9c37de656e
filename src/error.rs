//! Error types shared by the scheduling services.
//!
//! Every public operation returns one of these kinds so that a caller can
//! branch on them mechanically (missing entity vs. bad input vs. storage
//! trouble) without parsing messages. Storage failures keep the original
//! `rusqlite` cause inspectable through `source()`.

use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: DateTime<Local>,
        end: DateTime<Local>,
    },

    #[error("invalid duration: minimum free-slot duration must be positive")]
    InvalidDuration,

    #[error("unsupported recurrence frequency '{0}'")]
    UnsupportedFrequency(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage failure while trying to {op}")]
    Storage {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl ScheduleError {
    /// Builds a closure that wraps a `rusqlite` error with the name of the
    /// operation that was being attempted, for use with `map_err`.
    pub(crate) fn storage(op: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Storage { op, source }
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
