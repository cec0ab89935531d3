//! Chart builders. Each builder turns already-computed data into a prepared model
//! wrapped in a [`figure::Figure`]; rendering is done with `plotters`.

pub(crate) mod axes;
pub mod distribution;
pub mod error;
pub mod figure;
pub mod period_grid;
pub mod report;
pub mod style;
pub mod summary;
pub mod temperature;
pub mod time_series;
pub mod training;
