//! Timeframe service entry point.
//! Provides database-backed operations for reserved intervals, organized
//! across focused submodules. The range-overlap query here is the storage
//! port behind conflict detection and availability finding.

use rusqlite::Connection;

pub mod crud;
pub mod queries;

/// Service for managing timeframes stored in SQLite.
pub struct TimeframeService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> TimeframeService<'a> {
    /// Create a new TimeframeService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
