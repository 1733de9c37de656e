//! Dateframe service for CRUD operations on administrative periods.
//!
//! Provides the date-containment queries the schedule layer uses to resolve
//! "the current active period".

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Row};

use crate::error::{Result, ScheduleError};
use crate::models::dateframe::Dateframe;
use crate::services::shared::{to_local_datetime, to_naive_date};

const DATE_FMT: &str = "%Y-%m-%d";

/// Service for managing dateframes stored in SQLite.
pub struct DateframeService<'a> {
    conn: &'a Connection,
}

impl<'a> DateframeService<'a> {
    /// Create a new DateframeService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new dateframe in the database.
    pub fn create(&self, frame: Dateframe) -> Result<Dateframe> {
        frame.validate().map_err(ScheduleError::Validation)?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO dateframes (name, start_date, end_date, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    frame.name.trim(),
                    frame.start_date.format(DATE_FMT).to_string(),
                    frame.end_date.map(|d| d.format(DATE_FMT).to_string()),
                    frame.active as i32,
                    now,
                ],
            )
            .map_err(ScheduleError::storage("create dateframe"))?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| ScheduleError::not_found("dateframe", id))
    }

    /// Get a dateframe by id; `Ok(None)` when it does not exist.
    pub fn get(&self, id: i64) -> Result<Option<Dateframe>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, start_date, end_date, is_active, created_at, updated_at
                 FROM dateframes WHERE id = ?1",
            )
            .map_err(ScheduleError::storage("get dateframe"))?;

        let mut rows = stmt
            .query_map(params![id], map_dateframe_row)
            .map_err(ScheduleError::storage("get dateframe"))?;

        rows.next()
            .transpose()
            .map_err(ScheduleError::storage("get dateframe"))
    }

    /// Update an existing dateframe; fails with `NotFound` for a missing id.
    pub fn update(&self, frame: &Dateframe) -> Result<()> {
        frame.validate().map_err(ScheduleError::Validation)?;
        let id = frame
            .id
            .ok_or_else(|| ScheduleError::Validation("Dateframe has no id".to_string()))?;

        let changed = self
            .conn
            .execute(
                "UPDATE dateframes
                 SET name = ?1, start_date = ?2, end_date = ?3, is_active = ?4, updated_at = ?5
                 WHERE id = ?6",
                params![
                    frame.name.trim(),
                    frame.start_date.format(DATE_FMT).to_string(),
                    frame.end_date.map(|d| d.format(DATE_FMT).to_string()),
                    frame.active as i32,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(ScheduleError::storage("update dateframe"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("dateframe", id));
        }
        Ok(())
    }

    /// Delete a dateframe; fails with `NotFound` for a missing id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM dateframes WHERE id = ?1", params![id])
            .map_err(ScheduleError::storage("delete dateframe"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("dateframe", id));
        }
        Ok(())
    }

    /// List every dateframe ordered by start date.
    pub fn list_all(&self) -> Result<Vec<Dateframe>> {
        self.query(
            "SELECT id, name, start_date, end_date, is_active, created_at, updated_at
             FROM dateframes ORDER BY start_date ASC",
            params![],
            "list dateframes",
        )
    }

    /// List the active dateframes ordered by start date.
    pub fn find_active(&self) -> Result<Vec<Dateframe>> {
        self.query(
            "SELECT id, name, start_date, end_date, is_active, created_at, updated_at
             FROM dateframes WHERE is_active = 1 ORDER BY start_date ASC",
            params![],
            "find active dateframes",
        )
    }

    /// Find every dateframe whose range contains the given date.
    pub fn find_containing(&self, date: NaiveDate) -> Result<Vec<Dateframe>> {
        let date = date.format(DATE_FMT).to_string();
        self.query(
            "SELECT id, name, start_date, end_date, is_active, created_at, updated_at
             FROM dateframes
             WHERE start_date <= ?1 AND (end_date IS NULL OR end_date >= ?1)
             ORDER BY start_date ASC",
            params![date],
            "find containing dateframes",
        )
    }

    /// The canonical "current period": the first active dateframe whose
    /// range contains the given date. Storage does not enforce exclusivity,
    /// so overlapping active frames resolve to the earliest-starting one.
    pub fn current_active(&self, date: NaiveDate) -> Result<Option<Dateframe>> {
        let frames = self.find_containing(date)?;
        Ok(frames.into_iter().find(|frame| frame.active))
    }

    fn query(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
        op: &'static str,
    ) -> Result<Vec<Dateframe>> {
        let mut stmt = self.conn.prepare(sql).map_err(ScheduleError::storage(op))?;
        let frames = stmt
            .query_map(args, map_dateframe_row)
            .map_err(ScheduleError::storage(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ScheduleError::storage(op))?;
        Ok(frames)
    }
}

fn map_dateframe_row(row: &Row<'_>) -> std::result::Result<Dateframe, rusqlite::Error> {
    let start_date = to_naive_date(row.get::<_, String>(2)?)?;
    let end_date = row
        .get::<_, Option<String>>(3)?
        .map(to_naive_date)
        .transpose()?;

    Ok(Dateframe {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        start_date,
        end_date,
        active: row.get::<_, i32>(4)? != 0,
        created_at: Some(to_local_datetime(row.get::<_, String>(5)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(6)?)?),
    })
}
