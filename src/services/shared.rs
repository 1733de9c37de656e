// Row conversion helpers shared by the storage services.
// Timestamps travel as RFC 3339 text, day sets as JSON arrays.

use chrono::{DateTime, Local, NaiveDate, Utc, Weekday};
use rusqlite::{self, Result};

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Serialize a timestamp for storage. Columns that SQL compares as text
/// must all carry the same UTC offset, otherwise two instants written on
/// either side of a DST change would compare by wall text instead of by
/// instant.
pub(crate) fn to_utc_rfc3339(value: DateTime<Local>) -> String {
    value.with_timezone(&Utc).to_rfc3339()
}

pub(crate) fn to_naive_date(value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn serialize_weekdays(weekdays: &[Weekday]) -> Option<String> {
    if weekdays.is_empty() {
        return None;
    }
    let codes: Vec<&str> = weekdays.iter().map(weekday_code).collect();
    serde_json::to_string(&codes).ok()
}

pub(crate) fn deserialize_weekdays(json: Option<String>) -> Result<Vec<Weekday>> {
    let Some(json) = json else {
        return Ok(Vec::new());
    };

    let codes: Vec<String> = serde_json::from_str(&json)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    codes
        .iter()
        .map(|code| {
            // A corrupted row must fail the read, not shrink the set.
            weekday_from_code(code).ok_or_else(|| {
                rusqlite::Error::ToSqlConversionFailure(
                    format!("unknown weekday code '{}'", code).into(),
                )
            })
        })
        .collect()
}

pub(crate) fn serialize_month_days(days: &[u32]) -> Option<String> {
    if days.is_empty() {
        return None;
    }
    serde_json::to_string(days).ok()
}

pub(crate) fn deserialize_month_days(json: Option<String>) -> Result<Vec<u32>> {
    let Some(json) = json else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&json).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn weekday_code(weekday: &Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

pub(crate) fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
