//! Occurrence generation.
//!
//! Expands one recurrence rule into concrete timestamps inside a bounding
//! window. Expansion is pure: it reads nothing from storage and produces a
//! finite, chronologically ascending, duplicate-free sequence. Every
//! generated timestamp carries the window start's time-of-day.

use chrono::{DateTime, Local};

use crate::error::{Result, ScheduleError};
use crate::models::recurrence::{Frequency, RecurrenceRule};
use crate::utils::date::end_of_day;

mod daily;
mod monthly;
mod utils;
mod weekly;
mod yearly;

/// Expand `rule` into occurrences within `[window_start, window_end]`.
///
/// A termination date before the window start yields an empty sequence; one
/// inside the window clamps the effective end so nothing strictly after it
/// is emitted. The rule's occurrence cap is applied last, after window
/// filtering, in generation order.
pub fn expand(
    rule: &RecurrenceRule,
    window_start: DateTime<Local>,
    window_end: DateTime<Local>,
) -> Result<Vec<DateTime<Local>>> {
    if window_start > window_end {
        return Err(ScheduleError::InvalidRange {
            start: window_start,
            end: window_end,
        });
    }

    let effective_end = match rule.until {
        Some(until) => {
            if until < window_start.date_naive() {
                log::debug!(
                    "rule '{}' terminated on {} before window start, nothing to expand",
                    rule.name,
                    until
                );
                return Ok(Vec::new());
            }
            match end_of_day(until) {
                Some(cutoff) => window_end.min(cutoff),
                None => window_end,
            }
        }
        None => window_end,
    };

    let mut occurrences = match rule.frequency {
        Frequency::Daily => daily::generate(rule, window_start, effective_end),
        Frequency::Weekly => weekly::generate(rule, window_start, effective_end),
        Frequency::Monthly => monthly::generate(rule, window_start, effective_end),
        Frequency::Yearly => yearly::generate(rule, window_start, effective_end),
    };

    if let Some(count) = rule.count {
        occurrences.truncate(count as usize);
    }

    Ok(occurrences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Timelike};

    fn at(y: i32, m: u32, d: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap()
    }

    fn rule(frequency: Frequency) -> RecurrenceRule {
        RecurrenceRule::new("test", frequency).unwrap()
    }

    #[test]
    fn test_invalid_range_is_rejected_without_output() {
        let result = expand(&rule(Frequency::Daily), at(2025, 6, 10, 9), at(2025, 6, 1, 9));
        assert!(matches!(result, Err(ScheduleError::InvalidRange { .. })));
    }

    #[test]
    fn test_termination_before_window_yields_empty() {
        let mut r = rule(Frequency::Daily);
        r.until = NaiveDate::from_ymd_opt(2025, 5, 1);

        let occurrences = expand(&r, at(2025, 6, 1, 9), at(2025, 6, 30, 9)).unwrap();
        assert!(occurrences.is_empty());
    }

    #[test]
    fn test_termination_inside_window_clamps() {
        let mut r = rule(Frequency::Daily);
        r.until = NaiveDate::from_ymd_opt(2025, 6, 5);

        let occurrences = expand(&r, at(2025, 6, 1, 9), at(2025, 6, 30, 9)).unwrap();
        assert_eq!(occurrences.len(), 5);
        assert_eq!(occurrences.last().unwrap().date_naive(), r.until.unwrap());
    }

    #[test]
    fn test_count_cap_truncates_chronologically() {
        let mut r = rule(Frequency::Daily);
        r.count = Some(3);

        let start = at(2025, 6, 1, 9);
        let occurrences = expand(&r, start, start + Duration::days(30)).unwrap();
        assert_eq!(occurrences.len(), 3);
        assert_eq!(occurrences[0], start);
        assert_eq!(occurrences[2], start + Duration::days(2));
    }

    #[test]
    fn test_time_of_day_is_preserved() {
        let occurrences = expand(
            &rule(Frequency::Daily),
            Local.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap(),
            Local.with_ymd_and_hms(2025, 6, 4, 23, 0, 0).unwrap(),
        )
        .unwrap();

        assert_eq!(occurrences.len(), 4);
        for occurrence in occurrences {
            assert_eq!((occurrence.hour(), occurrence.minute()), (14, 30));
        }
    }

    #[test]
    fn test_sequence_is_ascending_and_duplicate_free() {
        let mut r = rule(Frequency::Monthly);
        r.month_days = vec![15, 1, 15, 28];

        let occurrences = expand(&r, at(2025, 1, 1, 8), at(2025, 6, 30, 8)).unwrap();
        for pair in occurrences.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
