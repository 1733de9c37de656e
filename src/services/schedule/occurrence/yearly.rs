use chrono::{DateTime, Datelike, Local};

use super::utils::{compose, push_if_in_window};
use crate::models::recurrence::RecurrenceRule;
use crate::utils::date::clamped_date;

/// Reuse the window start's month and day for each year step. A February 29
/// anchor clamps to February 28 in non-leap years.
pub(super) fn generate(
    rule: &RecurrenceRule,
    window_start: DateTime<Local>,
    effective_end: DateTime<Local>,
) -> Vec<DateTime<Local>> {
    let mut occurrences = Vec::new();
    let month = window_start.month();
    let day = window_start.day();
    let time = window_start.time();
    let end_year = effective_end.year();

    let mut year = window_start.year();
    while year <= end_year {
        if let Some(date) = clamped_date(year, month, day) {
            if let Some(candidate) = compose(date, time) {
                push_if_in_window(&mut occurrences, candidate, window_start, effective_end);
            }
        }
        year += rule.interval as i32;
    }

    occurrences
}
