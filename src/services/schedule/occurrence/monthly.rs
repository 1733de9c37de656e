use chrono::{DateTime, Datelike, Local};

use super::utils::{compose, push_if_in_window};
use crate::models::recurrence::RecurrenceRule;
use crate::utils::date::{advance_months, clamped_date};

/// Step a month cursor by the rule's interval and emit each requested
/// day-of-month, clamped to the month's length (day 31 in a 30-day month
/// becomes day 30). An empty day set defaults to the window start's day.
pub(super) fn generate(
    rule: &RecurrenceRule,
    window_start: DateTime<Local>,
    effective_end: DateTime<Local>,
) -> Vec<DateTime<Local>> {
    let mut occurrences = Vec::new();
    let mut days = if rule.month_days.is_empty() {
        vec![window_start.day()]
    } else {
        rule.month_days.clone()
    };
    days.sort_unstable();
    days.dedup();

    let time = window_start.time();
    let last_date = effective_end.date_naive();

    // Cursor walks the first of each emitting month.
    let Some(mut cursor) = window_start.date_naive().with_day(1) else {
        return occurrences;
    };

    while cursor <= last_date {
        for &day in &days {
            let Some(date) = clamped_date(cursor.year(), cursor.month(), day) else {
                continue;
            };
            if let Some(candidate) = compose(date, time) {
                push_if_in_window(&mut occurrences, candidate, window_start, effective_end);
            }
        }

        match advance_months(cursor, rule.interval) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    occurrences
}
