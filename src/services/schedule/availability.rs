//! Free-slot computation over the stored timeframes.

use chrono::{DateTime, Duration, Local};

use crate::error::{Result, ScheduleError};
use crate::models::timeframe::{coalesce, FreeSlot, Timeframe};
use crate::services::timeframe::TimeframeService;

/// Maximal free gaps of at least `min_duration` between the active
/// timeframes inside `[window_start, window_end]`.
pub(super) fn find_free_slots(
    timeframes: &TimeframeService<'_>,
    window_start: DateTime<Local>,
    window_end: DateTime<Local>,
    min_duration: Duration,
) -> Result<Vec<FreeSlot>> {
    if window_start > window_end {
        return Err(ScheduleError::InvalidRange {
            start: window_start,
            end: window_end,
        });
    }
    if min_duration <= Duration::zero() {
        return Err(ScheduleError::InvalidDuration);
    }

    let busy = timeframes.find_overlapping(window_start, Some(window_end))?;
    Ok(walk_gaps(busy, window_start, window_end, min_duration))
}

/// Cursor walk over the busy intervals. Overlapping or adjacent inputs are
/// coalesced first; without that step a frame starting before an earlier
/// one ends would move the cursor backwards and corrupt the gap arithmetic.
fn walk_gaps(
    busy: Vec<Timeframe>,
    window_start: DateTime<Local>,
    window_end: DateTime<Local>,
    min_duration: Duration,
) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    let mut cursor = window_start;

    for frame in coalesce(busy) {
        if cursor < frame.start {
            let gap = FreeSlot::new(cursor, frame.start.min(window_end));
            if gap.duration() >= min_duration {
                slots.push(gap);
            }
        }

        match frame.end {
            Some(end) => cursor = cursor.max(end),
            // Open-ended: no free time can be assumed after this point.
            None => return slots,
        }

        if cursor >= window_end {
            return slots;
        }
    }

    if cursor < window_end {
        let tail = FreeSlot::new(cursor, window_end);
        if tail.duration() >= min_duration {
            slots.push(tail);
        }
    }

    slots
}
