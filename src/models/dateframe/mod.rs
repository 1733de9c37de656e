// Dateframe module
// Named administrative date range (a term, a holiday block, ...)

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named, possibly open-ended date range representing a top-level
/// active period such as a school term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dateframe {
    pub id: Option<i64>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Dateframe {
    /// Create a new dateframe with required fields
    ///
    /// # Examples
    /// ```
    /// use nido_schedule::models::dateframe::Dateframe;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    /// let frame = Dateframe::new("Autumn Term", start).unwrap();
    /// assert!(frame.active);
    /// ```
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Result<Self, String> {
        let frame = Self {
            id: None,
            name: name.into(),
            start_date,
            end_date: None,
            active: true,
            created_at: None,
            updated_at: None,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Validate the dateframe invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Dateframe name cannot be empty".to_string());
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err("Dateframe end date must not be before start date".to_string());
            }
        }

        Ok(())
    }

    /// Whether the given date lies inside this frame. An absent end date
    /// means the frame is still running.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }
}
