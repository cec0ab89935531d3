use crate::dataset::error::DataError;
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No data available for the {0} chart")]
    NoData(&'static str),

    #[error("Training history has no '{0}' series")]
    MissingSeries(String),

    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error(transparent)]
    Data(#[from] DataError),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(error: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(error.to_string())
    }
}
