use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' could not be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Row {row} of column '{column}' has no usable timestamp")]
    InvalidTimestamp { column: String, row: usize },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to read '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV readings from '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Failed to parse JSON from '{0}'")]
    JsonParse(PathBuf, #[source] serde_json::Error),
}
