// Recurrence module
// Abstract repeating pattern expanded on demand by the schedule engine

use chrono::{DateTime, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// How often a rule repeats. Exactly four frequencies exist; there is no
/// plugin mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Parse the storage representation. Unknown text is the one place an
    /// unsupported frequency can enter the system, so it fails loudly
    /// instead of silently defaulting.
    pub fn parse(value: &str) -> Result<Self, ScheduleError> {
        match value {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(ScheduleError::UnsupportedFrequency(other.to_string())),
        }
    }
}

/// An abstract repeating pattern. The engine treats a rule as an immutable
/// expansion specification; it never stores generated occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub id: Option<i64>,
    pub name: String,
    pub frequency: Frequency,
    /// Step between occurrences, e.g. 2 for "every 2 weeks". Always >= 1.
    pub interval: u32,
    /// Weekday constraint, meaningful for Weekly only. Empty set defaults
    /// to the weekday of the expansion window's start.
    pub weekdays: Vec<Weekday>,
    /// Day-of-month constraint, meaningful for Monthly only. Empty set
    /// defaults to the day-of-month of the expansion window's start.
    pub month_days: Vec<u32>,
    /// Occurrences strictly after this date are excluded.
    pub until: Option<NaiveDate>,
    /// Caps the generated list length, applied after window filtering.
    pub count: Option<u32>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl RecurrenceRule {
    /// Create a new rule with required fields and interval 1.
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Result<Self, String> {
        let rule = Self {
            id: None,
            name: name.into(),
            frequency,
            interval: 1,
            weekdays: Vec::new(),
            month_days: Vec::new(),
            until: None,
            count: None,
            created_at: None,
            updated_at: None,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Validate the rule invariants. A weekday set on a non-weekly rule is
    /// ignored at expansion time, not rejected here.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Recurrence rule name cannot be empty".to_string());
        }

        if self.interval < 1 {
            return Err("Recurrence interval must be at least 1".to_string());
        }

        if let Some(&day) = self.month_days.iter().find(|&&d| d < 1 || d > 31) {
            return Err(format!("Day of month {} is outside 1-31", day));
        }

        if let Some(count) = self.count {
            if count == 0 {
                return Err("Occurrence count cap must be at least 1".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("daily", Frequency::Daily)]
    #[test_case("weekly", Frequency::Weekly)]
    #[test_case("monthly", Frequency::Monthly)]
    #[test_case("yearly", Frequency::Yearly)]
    fn test_frequency_round_trips(text: &str, frequency: Frequency) {
        assert_eq!(Frequency::parse(text).unwrap(), frequency);
        assert_eq!(frequency.as_str(), text);
    }

    #[test]
    fn test_frequency_parse_rejects_unknown() {
        let err = Frequency::parse("fortnightly").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ScheduleError::UnsupportedFrequency(_)
        ));
    }

    #[test]
    fn test_new_rule_defaults() {
        let rule = RecurrenceRule::new("Swimming", Frequency::Weekly).unwrap();
        assert_eq!(rule.interval, 1);
        assert!(rule.weekdays.is_empty());
        assert!(rule.month_days.is_empty());
        assert!(rule.until.is_none());
        assert!(rule.count.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut rule = RecurrenceRule::new("Swimming", Frequency::Weekly).unwrap();
        rule.interval = 2;
        rule.weekdays = vec![Weekday::Mon, Weekday::Wed];
        rule.until = chrono::NaiveDate::from_ymd_opt(2026, 7, 1);

        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"weekly\""));
        let back: RecurrenceRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut rule = RecurrenceRule::new("Swimming", Frequency::Weekly).unwrap();
        rule.interval = 0;
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_month_day_out_of_range() {
        let mut rule = RecurrenceRule::new("Invoicing", Frequency::Monthly).unwrap();
        rule.month_days = vec![15, 32];
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_weekdays_on_monthly_rule() {
        let mut rule = RecurrenceRule::new("Invoicing", Frequency::Monthly).unwrap();
        rule.weekdays = vec![Weekday::Mon];
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let mut rule = RecurrenceRule::new("Swimming", Frequency::Daily).unwrap();
        rule.count = Some(0);
        assert!(rule.validate().is_err());
    }
}
