// Date utility functions shared by the recurrence engine and services

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Last second of the given date in the local zone; `None` only when the
/// wall time does not resolve (DST edge).
pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    date.and_hms_opt(23, 59, 59)?
        .and_local_timezone(Local)
        .single()
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// Build a date in the given month, clamping the requested day to the last
/// valid day of that month (day 31 in April becomes April 30, Feb 29 in a
/// non-leap year becomes Feb 28).
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(last))
}

/// Advance by whole months, keeping day 1. The recurrence engine walks
/// month cursors on the first of the month and applies day sets separately.
pub fn advance_months(first_of_month: NaiveDate, months: u32) -> Option<NaiveDate> {
    let zero_based = first_of_month.month0() + months;
    let year = first_of_month.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}
