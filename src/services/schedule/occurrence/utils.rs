use chrono::{DateTime, Local, NaiveDate, NaiveTime};

/// Attach the window's time-of-day to a generated date in the local zone.
/// Returns `None` for wall times that do not exist (DST gap); such a day is
/// skipped rather than shifted.
pub(super) fn compose(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    date.and_time(time).and_local_timezone(Local).single()
}

/// Push `candidate` when it lies inside `[window_start, effective_end]`.
pub(super) fn push_if_in_window(
    occurrences: &mut Vec<DateTime<Local>>,
    candidate: DateTime<Local>,
    window_start: DateTime<Local>,
    effective_end: DateTime<Local>,
) {
    if candidate >= window_start && candidate <= effective_end {
        occurrences.push(candidate);
    }
}
