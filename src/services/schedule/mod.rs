//! Schedule service facade.
//!
//! The only scheduling surface exposed to request handlers: it fetches
//! rules and timeframes through the storage services it owns, delegates to
//! the pure expansion/availability logic, and returns typed results. Every
//! call is a pure function of its inputs plus read-only storage queries, so
//! concurrent calls are safe by construction; nothing here caches or
//! mutates shared state.

use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

mod availability;
mod conflict;
pub mod occurrence;

pub use occurrence::expand;

use crate::error::{Result, ScheduleError};
use crate::models::recurrence::RecurrenceRule;
use crate::models::timeframe::{FreeSlot, Timeframe};
use crate::services::dateframe::DateframeService;
use crate::services::rule::RecurrenceRuleService;
use crate::services::timeframe::TimeframeService;

/// Facade over the recurrence and availability engine.
pub struct ScheduleService<'a> {
    conn: &'a Connection,
}

impl<'a> ScheduleService<'a> {
    /// Create a new ScheduleService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Expand a stored rule into occurrences within the window. The window
    /// is validated before any storage read; a missing rule id fails with
    /// `NotFound`.
    pub fn expand_rule(
        &self,
        rule_id: i64,
        window_start: DateTime<Local>,
        window_end: DateTime<Local>,
    ) -> Result<Vec<DateTime<Local>>> {
        if window_start > window_end {
            return Err(ScheduleError::InvalidRange {
                start: window_start,
                end: window_end,
            });
        }

        let rule = self
            .rules()
            .get(rule_id)?
            .ok_or_else(|| ScheduleError::not_found("recurrence rule", rule_id))?;

        log::debug!(
            "expanding rule '{}' ({}) over {} .. {}",
            rule.name,
            rule.frequency.as_str(),
            window_start,
            window_end
        );
        occurrence::expand(&rule, window_start, window_end)
    }

    /// Expand an unpersisted rule. Same contract as [`expand_rule`] minus
    /// the storage fetch.
    ///
    /// [`expand_rule`]: Self::expand_rule
    pub fn expand(
        &self,
        rule: &RecurrenceRule,
        window_start: DateTime<Local>,
        window_end: DateTime<Local>,
    ) -> Result<Vec<DateTime<Local>>> {
        occurrence::expand(rule, window_start, window_end)
    }

    /// Whether any active timeframe overlaps the candidate range, plus the
    /// overlapping set. `None` for `end` means open-ended.
    pub fn has_conflict(
        &self,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
    ) -> Result<(bool, Vec<Timeframe>)> {
        conflict::detect(&self.timeframes(), start, end)
    }

    /// Free gaps of at least `min_duration` within the window.
    pub fn find_free_slots(
        &self,
        window_start: DateTime<Local>,
        window_end: DateTime<Local>,
        min_duration: Duration,
    ) -> Result<Vec<FreeSlot>> {
        availability::find_free_slots(&self.timeframes(), window_start, window_end, min_duration)
    }

    /// CRUD passthrough for dateframes.
    pub fn dateframes(&self) -> DateframeService<'a> {
        DateframeService::new(self.conn)
    }

    /// CRUD passthrough for timeframes.
    pub fn timeframes(&self) -> TimeframeService<'a> {
        TimeframeService::new(self.conn)
    }

    /// CRUD passthrough for recurrence rules.
    pub fn rules(&self) -> RecurrenceRuleService<'a> {
        RecurrenceRuleService::new(self.conn)
    }
}
