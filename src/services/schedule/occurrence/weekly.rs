use chrono::{DateTime, Datelike, Duration, Local};

use super::utils::{compose, push_if_in_window};
use crate::models::recurrence::RecurrenceRule;

/// Walk the window day by day and emit the days whose weekday is in the
/// rule's set (or the window start's weekday when the set is empty).
///
/// Week convention for `interval > 1`: weeks are 7-day blocks anchored at
/// the window start, not calendar weeks starting on a fixed weekday. Block
/// `k` covers days `[7k, 7k+6]` after the start, and only blocks whose
/// index is a multiple of the interval emit occurrences.
pub(super) fn generate(
    rule: &RecurrenceRule,
    window_start: DateTime<Local>,
    effective_end: DateTime<Local>,
) -> Vec<DateTime<Local>> {
    let mut occurrences = Vec::new();
    let weekdays = if rule.weekdays.is_empty() {
        vec![window_start.weekday()]
    } else {
        rule.weekdays.clone()
    };
    let interval = i64::from(rule.interval);
    let time = window_start.time();
    let start_date = window_start.date_naive();
    let last_date = effective_end.date_naive();

    let mut date = start_date;
    while date <= last_date {
        let block = (date - start_date).num_days() / 7;
        if block % interval == 0 && weekdays.contains(&date.weekday()) {
            if let Some(candidate) = compose(date, time) {
                push_if_in_window(&mut occurrences, candidate, window_start, effective_end);
            }
        }
        date += Duration::days(1);
    }

    occurrences
}
