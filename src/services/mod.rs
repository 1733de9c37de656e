// Service layer
// Database-backed services plus the schedule engine facade

pub mod database;
pub mod dateframe;
pub mod rule;
pub mod schedule;
pub mod timeframe;

pub(crate) mod shared;
