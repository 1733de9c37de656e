//! Recurrence rule service for CRUD operations on repeating patterns.
//!
//! Rules are stored with their frequency as text and their day sets as JSON
//! arrays; an unknown frequency in a row surfaces as `UnsupportedFrequency`
//! instead of being silently defaulted.

use chrono::{Local, Weekday};
use rusqlite::{params, Connection, Row};

use crate::error::{Result, ScheduleError};
use crate::models::recurrence::{Frequency, RecurrenceRule};
use crate::services::shared::{
    deserialize_month_days, deserialize_weekdays, serialize_month_days, serialize_weekdays,
    to_local_datetime, to_naive_date, weekday_code,
};

const DATE_FMT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str = "id, name, frequency, interval, weekdays, month_days,
                              until_date, occurrence_count, created_at, updated_at";

/// Service for managing recurrence rules stored in SQLite.
pub struct RecurrenceRuleService<'a> {
    conn: &'a Connection,
}

impl<'a> RecurrenceRuleService<'a> {
    /// Create a new RecurrenceRuleService with the given database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new rule in the database.
    pub fn create(&self, rule: RecurrenceRule) -> Result<RecurrenceRule> {
        rule.validate().map_err(ScheduleError::Validation)?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO recurrence_rules
                     (name, frequency, interval, weekdays, month_days, until_date,
                      occurrence_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    rule.name.trim(),
                    rule.frequency.as_str(),
                    rule.interval,
                    serialize_weekdays(&rule.weekdays),
                    serialize_month_days(&rule.month_days),
                    rule.until.map(|d| d.format(DATE_FMT).to_string()),
                    rule.count,
                    now,
                ],
            )
            .map_err(ScheduleError::storage("create recurrence rule"))?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?
            .ok_or_else(|| ScheduleError::not_found("recurrence rule", id))
    }

    /// Get a rule by id; `Ok(None)` when it does not exist.
    pub fn get(&self, id: i64) -> Result<Option<RecurrenceRule>> {
        let sql = format!(
            "SELECT {} FROM recurrence_rules WHERE id = ?1",
            SELECT_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(ScheduleError::storage("get recurrence rule"))?;

        let mut rows = stmt
            .query_map(params![id], map_rule_row)
            .map_err(ScheduleError::storage("get recurrence rule"))?;

        match rows.next().transpose() {
            Ok(row) => row.map(finish_rule_row).transpose(),
            Err(e) => Err(ScheduleError::storage("get recurrence rule")(e)),
        }
    }

    /// Update an existing rule; fails with `NotFound` for a missing id.
    pub fn update(&self, rule: &RecurrenceRule) -> Result<()> {
        rule.validate().map_err(ScheduleError::Validation)?;
        let id = rule
            .id
            .ok_or_else(|| ScheduleError::Validation("Recurrence rule has no id".to_string()))?;

        let changed = self
            .conn
            .execute(
                "UPDATE recurrence_rules
                 SET name = ?1, frequency = ?2, interval = ?3, weekdays = ?4,
                     month_days = ?5, until_date = ?6, occurrence_count = ?7, updated_at = ?8
                 WHERE id = ?9",
                params![
                    rule.name.trim(),
                    rule.frequency.as_str(),
                    rule.interval,
                    serialize_weekdays(&rule.weekdays),
                    serialize_month_days(&rule.month_days),
                    rule.until.map(|d| d.format(DATE_FMT).to_string()),
                    rule.count,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .map_err(ScheduleError::storage("update recurrence rule"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("recurrence rule", id));
        }
        Ok(())
    }

    /// Delete a rule; fails with `NotFound` for a missing id.
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM recurrence_rules WHERE id = ?1", params![id])
            .map_err(ScheduleError::storage("delete recurrence rule"))?;

        if changed == 0 {
            return Err(ScheduleError::not_found("recurrence rule", id));
        }
        Ok(())
    }

    /// List every rule ordered by name.
    pub fn list_all(&self) -> Result<Vec<RecurrenceRule>> {
        let sql = format!("SELECT {} FROM recurrence_rules ORDER BY name ASC", SELECT_COLUMNS);
        self.query(&sql, params![], "list recurrence rules")
    }

    /// List rules with the given frequency.
    pub fn find_by_frequency(&self, frequency: Frequency) -> Result<Vec<RecurrenceRule>> {
        let sql = format!(
            "SELECT {} FROM recurrence_rules WHERE frequency = ?1 ORDER BY name ASC",
            SELECT_COLUMNS
        );
        self.query(&sql, params![frequency.as_str()], "find rules by frequency")
    }

    /// List rules whose weekday set contains the given weekday.
    pub fn find_by_weekday(&self, weekday: Weekday) -> Result<Vec<RecurrenceRule>> {
        // Day sets are JSON arrays of quoted codes, so a LIKE match on the
        // quoted code is exact.
        let pattern = format!("%\"{}\"%", weekday_code(&weekday));
        let sql = format!(
            "SELECT {} FROM recurrence_rules WHERE weekdays LIKE ?1 ORDER BY name ASC",
            SELECT_COLUMNS
        );
        self.query(&sql, params![pattern], "find rules by weekday")
    }

    fn query(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
        op: &'static str,
    ) -> Result<Vec<RecurrenceRule>> {
        let mut stmt = self.conn.prepare(sql).map_err(ScheduleError::storage(op))?;
        let raw = stmt
            .query_map(args, map_rule_row)
            .map_err(ScheduleError::storage(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ScheduleError::storage(op))?;

        raw.into_iter().map(finish_rule_row).collect()
    }
}

/// Row data before the frequency text has been checked.
struct RawRuleRow {
    rule: RecurrenceRule,
    frequency_text: String,
}

fn map_rule_row(row: &Row<'_>) -> std::result::Result<RawRuleRow, rusqlite::Error> {
    let until = row
        .get::<_, Option<String>>(6)?
        .map(to_naive_date)
        .transpose()?;

    let rule = RecurrenceRule {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        // Placeholder until the text is parsed; see finish_rule_row.
        frequency: Frequency::Daily,
        interval: row.get(3)?,
        weekdays: deserialize_weekdays(row.get(4)?)?,
        month_days: deserialize_month_days(row.get(5)?)?,
        until,
        count: row.get(7)?,
        created_at: Some(to_local_datetime(row.get::<_, String>(8)?)?),
        updated_at: Some(to_local_datetime(row.get::<_, String>(9)?)?),
    };

    Ok(RawRuleRow {
        rule,
        frequency_text: row.get(2)?,
    })
}

fn finish_rule_row(raw: RawRuleRow) -> Result<RecurrenceRule> {
    let mut rule = raw.rule;
    rule.frequency = Frequency::parse(&raw.frequency_text)?;
    Ok(rule)
}
