use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_dateframes_table(conn)?;
    create_timeframes_table(conn)?;
    create_recurrence_rules_table(conn)?;
    Ok(())
}

fn create_dateframes_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS dateframes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create dateframes table")?;

    Ok(())
}

fn create_timeframes_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS timeframes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create timeframes table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_timeframes_start
         ON timeframes (start_datetime)",
        [],
    )
    .context("Failed to create timeframes start index")?;

    Ok(())
}

fn create_recurrence_rules_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS recurrence_rules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            frequency TEXT NOT NULL,
            interval INTEGER NOT NULL DEFAULT 1,
            weekdays TEXT,
            month_days TEXT,
            until_date TEXT,
            occurrence_count INTEGER,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create recurrence_rules table")?;

    Ok(())
}
