// Test fixtures - reusable test data
// Provides consistent dates and rules across the test files

use chrono::{DateTime, Local, TimeZone};
use nido_schedule::models::recurrence::{Frequency, RecurrenceRule};
use nido_schedule::services::database::Database;

/// In-memory database with the schema applied.
pub fn test_db() -> Database {
    let _ = env_logger::builder().is_test(true).try_init();
    let db = Database::new(":memory:").unwrap();
    db.initialize_schema().unwrap();
    db
}

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday June 2, 2025 at the given time.
    pub fn june_monday(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
    }

    /// An arbitrary day of June 2025 at the given hour.
    pub fn june(day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    /// Leap day 2024 at 09:00.
    pub fn leap_day_2024() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap()
    }
}

/// Sample rules for testing
pub mod rules {
    use super::*;
    use chrono::Weekday;

    pub fn daily(interval: u32) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new("Daily session", Frequency::Daily).unwrap();
        rule.interval = interval;
        rule
    }

    pub fn weekly_on(weekdays: Vec<Weekday>) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new("Weekly session", Frequency::Weekly).unwrap();
        rule.weekdays = weekdays;
        rule
    }

    pub fn monthly_on(month_days: Vec<u32>) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new("Monthly session", Frequency::Monthly).unwrap();
        rule.month_days = month_days;
        rule
    }

    pub fn yearly() -> RecurrenceRule {
        RecurrenceRule::new("Yearly session", Frequency::Yearly).unwrap()
    }
}
