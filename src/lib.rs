// Nido Schedule Library
// Recurrence expansion and timeframe availability for the childcare backend

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Result, ScheduleError};
