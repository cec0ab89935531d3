pub mod color;
pub mod day_period;
pub mod forecast_point;
pub mod into_timestamp;
pub mod reading;
pub mod training_history;
