use chrono::{DateTime, Local};
use rusqlite::{params, Row};

use super::TimeframeService;
use crate::error::{Result, ScheduleError};
use crate::models::timeframe::Timeframe;
use crate::services::shared::{to_local_datetime, to_utc_rfc3339};

impl<'a> TimeframeService<'a> {
    /// List every timeframe ordered by start.
    pub fn list_all(&self) -> Result<Vec<Timeframe>> {
        self.query(
            "SELECT id, label, start_datetime, end_datetime, is_active, created_at, updated_at
             FROM timeframes ORDER BY start_datetime ASC",
            params![],
            "list timeframes",
        )
    }

    /// List the active timeframes ordered by start.
    pub fn find_active(&self) -> Result<Vec<Timeframe>> {
        self.query(
            "SELECT id, label, start_datetime, end_datetime, is_active, created_at, updated_at
             FROM timeframes WHERE is_active = 1 ORDER BY start_datetime ASC",
            params![],
            "find active timeframes",
        )
    }

    /// Every active timeframe whose interval overlaps the candidate range.
    /// An absent candidate end means "unbounded above"; an open-ended row
    /// overlaps everything at or after its own start.
    ///
    /// Timestamps are stored UTC-normalized, so the textual comparisons
    /// below compare instants even across a DST change.
    pub fn find_overlapping(
        &self,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
    ) -> Result<Vec<Timeframe>> {
        let op = "find overlapping timeframes";
        match end {
            Some(end) => self.query(
                "SELECT id, label, start_datetime, end_datetime, is_active, created_at, updated_at
                 FROM timeframes
                 WHERE is_active = 1
                   AND start_datetime <= ?1
                   AND (end_datetime IS NULL OR end_datetime > ?2)
                 ORDER BY start_datetime ASC",
                params![to_utc_rfc3339(end), to_utc_rfc3339(start)],
                op,
            ),
            None => self.query(
                "SELECT id, label, start_datetime, end_datetime, is_active, created_at, updated_at
                 FROM timeframes
                 WHERE is_active = 1
                   AND (end_datetime IS NULL OR end_datetime > ?1)
                 ORDER BY start_datetime ASC",
                params![to_utc_rfc3339(start)],
                op,
            ),
        }
    }

    fn query(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
        op: &'static str,
    ) -> Result<Vec<Timeframe>> {
        let mut stmt = self.conn.prepare(sql).map_err(ScheduleError::storage(op))?;
        let frames = stmt
            .query_map(args, map_timeframe_row)
            .map_err(ScheduleError::storage(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ScheduleError::storage(op))?;
        Ok(frames)
    }
}

pub(super) fn map_timeframe_row(row: &Row<'_>) -> std::result::Result<Timeframe, rusqlite::Error> {
    let end = row
        .get::<_, Option<String>>(3)?
        .map(to_local_datetime)
        .transpose()?;

    Ok(Timeframe {
        id: Some(row.get(0)?),
        label: row.get(1)?,
        start: to_local_datetime(row.get::<_, String>(2)?)?,
        end,
        active: row.get::<_, i32>(4)? != 0,
        created_at: Some(to_local_datetime(row.get::<_, String>(5)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(6)?)?),
    })
}
