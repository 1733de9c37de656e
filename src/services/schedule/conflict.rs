//! Conflict detection against the stored timeframes.

use chrono::{DateTime, Local};

use crate::error::{Result, ScheduleError};
use crate::models::timeframe::Timeframe;
use crate::services::timeframe::TimeframeService;

/// Whether any active timeframe overlaps the candidate range, together with
/// the overlapping set so callers can report which bookings collide.
///
/// An absent candidate end means "blocked from `start` onwards". Read-only
/// and idempotent; repeated calls without storage mutation agree.
pub(super) fn detect(
    timeframes: &TimeframeService<'_>,
    start: DateTime<Local>,
    end: Option<DateTime<Local>>,
) -> Result<(bool, Vec<Timeframe>)> {
    if let Some(end) = end {
        if start > end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
    }

    let overlapping = timeframes.find_overlapping(start, end)?;
    Ok((!overlapping.is_empty(), overlapping))
}
