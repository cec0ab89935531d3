//! Loading the inputs of the visualizer: the readings table, forecast records and the
//! training history.

pub mod error;
pub mod readings;

use crate::dataset::error::DataError;
use crate::types::forecast_point::ForecastPoint;
use crate::types::training_history::TrainingHistory;
use log::info;
use polars::prelude::*;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads a CSV file of historical readings into a `DataFrame`.
///
/// The file must have a header row. Date-like columns are parsed when polars can infer
/// them; otherwise [`readings::ReadingTable::from_frame`] parses the `datetime`
/// column as text later on.
pub fn load_readings_csv(path: impl AsRef<Path>) -> Result<DataFrame, DataError> {
    let path = path.as_ref();
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DataError::CsvRead(path.to_path_buf(), e))?;
    info!("Loaded {} readings from {:?}", frame.height(), path);
    Ok(frame)
}

/// Reads a JSON array of forecast records.
pub fn load_forecasts_json(path: impl AsRef<Path>) -> Result<Vec<ForecastPoint>, DataError> {
    let forecasts: Vec<ForecastPoint> = read_json(path.as_ref())?;
    info!("Loaded {} forecast points from {:?}", forecasts.len(), path.as_ref());
    Ok(forecasts)
}

/// Reads a training history dump (flat or nested under `history`).
pub fn load_history_json(path: impl AsRef<Path>) -> Result<TrainingHistory, DataError> {
    read_json(path.as_ref())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DataError::FileRead(path.to_path_buf(), e))?;
    serde_json::from_str(&raw).map_err(|e| DataError::JsonParse(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::readings::ReadingTable;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_forecasts_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"fecha": "2024-05-01 02:00", "temperatura": 12.0, "confianza": 0.9, "categoria": "Frío"}},
               {{"fecha": "2024-05-01 14:00", "temperatura": 18.0, "confianza": 0.6, "categoria": "Cálido"}}]"#
        )
        .unwrap();
        let forecasts = load_forecasts_json(file.path()).unwrap();
        assert_eq!(forecasts.len(), 2);
        assert_eq!(forecasts[1].category, "Cálido");
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_history_json(dir.path().join("nope.json"));
        assert!(matches!(result, Err(DataError::FileRead(_, _))));
    }

    #[test]
    fn test_load_readings_csv_roundtrips_into_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "datetime,temperature,relative_humidity,precipitation_mm,cloud_cover_octas,wind_speed_kmh,solar_radiation,category").unwrap();
        writeln!(file, "2024-05-01 00:00:00,11.5,90,0.0,3,4.0,0,Frío").unwrap();
        writeln!(file, "2024-05-01 01:00:00,11.0,91,0.2,4,3.5,0,Llovizna").unwrap();
        file.flush().unwrap();

        let frame = load_readings_csv(file.path()).unwrap();
        let table = ReadingTable::from_frame(&frame).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.readings()[1].category.as_deref(), Some("Llovizna"));
        assert_eq!(table.readings()[0].relative_humidity, Some(90.0));
    }
}
