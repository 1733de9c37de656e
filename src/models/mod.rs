// Module exports for models

pub mod dateframe;
pub mod recurrence;
pub mod timeframe;
