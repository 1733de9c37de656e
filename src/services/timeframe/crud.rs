use chrono::Local;
use rusqlite::params;

use super::queries::map_timeframe_row;
use super::TimeframeService;
use crate::error::{Result, ScheduleError};
use crate::models::timeframe::Timeframe;
use crate::services::shared::to_utc_rfc3339;

impl<'a> TimeframeService<'a> {
    /// Create a new timeframe in the database.
    pub fn create(&self, frame: Timeframe) -> Result<Timeframe> {
        frame.validate().map_err(ScheduleError::Validation)?;

        let now = to_utc_rfc3339(Local::now());
        self.conn
            .execute(
                "INSERT INTO timeframes (label, start_datetime, end_datetime, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    frame.label,
                    to_utc_rfc3339(frame.start),
                    frame.end.map(to_utc_rfc3339),
                    frame.active as i32,
                    now,
                ],
            )
            .map_err(ScheduleError::storage("create timeframe"))?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| ScheduleError::not_found("timeframe", id))
    }

    /// Get a timeframe by id; `Ok(None)` when it does not exist.
    pub fn get(&self, id: i64) -> Result<Option<Timeframe>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, label, start_datetime, end_datetime, is_active, created_at, updated_at
                 FROM timeframes WHERE id = ?1",
            )
            .map_err(ScheduleError::storage("get timeframe"))?;

        let mut rows = stmt
            .query_map(params![id], map_timeframe_row)
            .map_err(ScheduleError::storage("get timeframe"))?;

        rows.next()
            .transpose()
            .map_err(ScheduleError::storage("get timeframe"))
    }

    /// Update an existing timeframe; fails with `NotFound` for a missing id.
    pub fn update(&self, frame: &Timeframe) -> Result<()> {
        frame.validate().map_err(ScheduleError::Validation)?;
        let id = frame
            .id
            .ok_or_else(|| ScheduleError::Validation("Timeframe has no id".to_string()))?;

        let changed = self
            .conn
            .execute(
                "UPDATE timeframes
                 SET label = ?1, start_datetime = ?2, end_datetime = ?3, is_active = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    frame.label,
                    to_utc_rfc3339(frame.start),
                    frame.end.map(to_utc_rfc3339),
                    frame.active as i32,
                    to_utc_rfc3339(Local::now()),
                    id,
                ],
            )
            .map_err(ScheduleError::storage("update timeframe"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("timeframe", id));
        }
        Ok(())
    }

    /// Delete a timeframe; fails with `NotFound` for a missing id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM timeframes WHERE id = ?1", params![id])
            .map_err(ScheduleError::storage("delete timeframe"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("timeframe", id));
        }
        Ok(())
    }
}
