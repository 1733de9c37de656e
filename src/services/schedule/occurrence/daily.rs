use chrono::{DateTime, Duration, Local};

use super::utils::{compose, push_if_in_window};
use crate::models::recurrence::RecurrenceRule;

/// Emit the window start, then every `interval`-th day after it, until the
/// effective end is passed.
pub(super) fn generate(
    rule: &RecurrenceRule,
    window_start: DateTime<Local>,
    effective_end: DateTime<Local>,
) -> Vec<DateTime<Local>> {
    let mut occurrences = Vec::new();
    let interval = i64::from(rule.interval);
    let time = window_start.time();
    let mut date = window_start.date_naive();
    let last_date = effective_end.date_naive();

    while date <= last_date {
        if let Some(candidate) = compose(date, time) {
            if candidate > effective_end {
                break;
            }
            push_if_in_window(&mut occurrences, candidate, window_start, effective_end);
        }
        date += Duration::days(interval);
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recurrence::Frequency;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn daily(interval: u32) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new("daily", Frequency::Daily).unwrap();
        rule.interval = interval;
        rule
    }

    #[test]
    fn test_one_week_yields_seven() {
        let occurrences = generate(&daily(1), at(1, 9), at(7, 9));
        assert_eq!(occurrences.len(), 7);
        assert_eq!(occurrences[0], at(1, 9));
        assert_eq!(occurrences[6], at(7, 9));
    }

    #[test]
    fn test_interval_three_skips_days() {
        let occurrences = generate(&daily(3), at(1, 9), at(10, 9));
        assert_eq!(occurrences, vec![at(1, 9), at(4, 9), at(7, 9), at(10, 9)]);
    }

    #[test]
    fn test_end_before_time_of_day_excludes_last_day() {
        // Window ends at 08:00 on day 3, occurrences fall on 09:00.
        let occurrences = generate(&daily(1), at(1, 9), at(3, 8));
        assert_eq!(occurrences, vec![at(1, 9), at(2, 9)]);
    }

    #[test]
    fn test_single_instant_window() {
        let occurrences = generate(&daily(1), at(1, 9), at(1, 9));
        assert_eq!(occurrences, vec![at(1, 9)]);
    }
}
