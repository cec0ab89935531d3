use crate::charts::error::ChartError;
use crate::dashboard::error::DashboardError;
use crate::dataset::error::DataError;
use crate::icons::error::IconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Icon(#[from] IconError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}
