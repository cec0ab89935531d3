//! Extraction of typed [`Reading`] rows and derived aggregates from the readings `DataFrame`.

use crate::dataset::error::DataError;
use crate::types::forecast_point::parse_timestamp;
use crate::types::reading::{Reading, Variable, CATEGORY_COLUMN, DATETIME_COLUMN};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;

/// The readings table after extraction from polars, sorted by timestamp.
///
/// Chart builders work on this instead of the raw frame so that column lookups and
/// dtype checks happen exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingTable {
    readings: Vec<Reading>,
    has_category: bool,
}

impl ReadingTable {
    /// Extracts all rows of `frame`.
    ///
    /// The frame must contain the `datetime` column and every [`Variable`] column.
    /// Integer columns are widened to `f64`; nulls are kept as `None`. The `category`
    /// column is optional.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::ColumnNotFound`] for a missing required column,
    /// [`DataError::ColumnType`] if a column cannot be read as numbers or text, and
    /// [`DataError::InvalidTimestamp`] for a null or unparsable timestamp.
    pub fn from_frame(frame: &DataFrame) -> Result<Self, DataError> {
        let datetimes = datetime_values(frame, DATETIME_COLUMN)?;
        let mut columns = Vec::with_capacity(Variable::ALL.len());
        for variable in Variable::ALL {
            columns.push(float_values(frame, variable.column())?);
        }
        let categories = if frame.column(CATEGORY_COLUMN).is_ok() {
            Some(string_values(frame, CATEGORY_COLUMN)?)
        } else {
            None
        };

        let mut readings: Vec<Reading> = datetimes
            .into_iter()
            .enumerate()
            .map(|(row, datetime)| {
                let value = |variable: Variable| columns[variable as usize][row];
                Reading {
                    datetime,
                    temperature: value(Variable::Temperature),
                    relative_humidity: value(Variable::RelativeHumidity),
                    precipitation_mm: value(Variable::Precipitation),
                    cloud_cover_octas: value(Variable::CloudCover),
                    wind_speed_kmh: value(Variable::WindSpeed),
                    solar_radiation: value(Variable::SolarRadiation),
                    category: categories.as_ref().and_then(|c| c[row].clone()),
                }
            })
            .collect();
        readings.sort_by_key(|r| r.datetime);

        Ok(Self {
            readings,
            has_category: categories.is_some(),
        })
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn has_category(&self) -> bool {
        self.has_category
    }

    /// `(timestamp, value)` pairs for one variable, skipping nulls.
    pub fn series(&self, variable: Variable) -> Vec<(NaiveDateTime, f64)> {
        self.readings
            .iter()
            .filter_map(|r| r.value(variable).map(|v| (r.datetime, v)))
            .collect()
    }

    /// All non-null values of one variable.
    pub fn values(&self, variable: Variable) -> Vec<f64> {
        self.readings
            .iter()
            .filter_map(|r| r.value(variable))
            .collect()
    }

    /// First and last timestamp, if any rows exist.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.readings.first()?.datetime, self.readings.last()?.datetime))
    }
}

/// Counts readings per category, most frequent first (ties broken by name).
///
/// Returns `None` when the frame has no `category` column; null categories are ignored.
pub fn category_counts(frame: &DataFrame) -> Result<Option<Vec<(String, u64)>>, DataError> {
    if frame.column(CATEGORY_COLUMN).is_err() {
        return Ok(None);
    }

    let counts = frame
        .clone()
        .lazy()
        .select([col(CATEGORY_COLUMN).cast(DataType::String)])
        .filter(col(CATEGORY_COLUMN).is_not_null())
        .group_by([col(CATEGORY_COLUMN)])
        .agg([len().alias("count")])
        .sort(
            ["count", CATEGORY_COLUMN],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let names = string_values(&counts, CATEGORY_COLUMN)?;
    let totals = counts
        .column("count")?
        .cast(&DataType::UInt64)?;
    let totals = totals.u64().map_err(|e| DataError::ColumnType {
        column: "count".to_string(),
        expected: "u64",
        source: e,
    })?;

    Ok(Some(
        names
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(name, total)| Some((name?, total?)))
            .collect(),
    ))
}

fn required_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column, DataError> {
    frame
        .column(name)
        .map_err(|e| DataError::ColumnNotFound(name.to_string(), e))
}

fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DataError> {
    let type_error = |e| DataError::ColumnType {
        column: name.to_string(),
        expected: "f64",
        source: e,
    };
    let column = required_column(frame, name)?
        .cast(&DataType::Float64)
        .map_err(type_error)?;
    let values = column.f64().map_err(type_error)?;
    Ok(values.into_iter().collect())
}

fn string_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DataError> {
    let type_error = |e| DataError::ColumnType {
        column: name.to_string(),
        expected: "string",
        source: e,
    };
    let column = required_column(frame, name)?
        .cast(&DataType::String)
        .map_err(type_error)?;
    let values = column.str().map_err(type_error)?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn datetime_values(frame: &DataFrame, name: &str) -> Result<Vec<NaiveDateTime>, DataError> {
    let column = required_column(frame, name)?;
    let type_error = |e| DataError::ColumnType {
        column: name.to_string(),
        expected: "datetime",
        source: e,
    };
    let invalid = |row| DataError::InvalidTimestamp {
        column: name.to_string(),
        row,
    };

    if matches!(column.dtype(), DataType::String) {
        let values = column.str().map_err(type_error)?;
        return values
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.and_then(parse_timestamp).ok_or_else(|| invalid(row)))
            .collect();
    }

    // Normalise Date / any Datetime unit to epoch milliseconds.
    let millis = column
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .and_then(|c| c.cast(&DataType::Int64))
        .map_err(type_error)?;
    let values = millis.i64().map_err(type_error)?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| invalid(row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample_frame() -> DataFrame {
        df!(
            "datetime" => [ts(2, 6), ts(1, 12), ts(1, 18)],
            "temperature" => [Some(14.0), Some(18.5), None],
            "relative_humidity" => [80i64, 65, 70],
            "precipitation_mm" => [0.0, 1.2, 0.4],
            "cloud_cover_octas" => [2.0, 7.0, 5.0],
            "wind_speed_kmh" => [5.0, 12.0, 8.0],
            "solar_radiation" => [150.0, 900.0, 20.0],
            "category" => ["Templado", "Lluvia Fuerte", "Templado"],
        )
        .unwrap()
    }

    #[test]
    fn test_from_frame_sorts_and_widens() {
        let table = ReadingTable::from_frame(&sample_frame()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.has_category());
        assert_eq!(table.readings()[0].datetime, ts(1, 12));
        assert_eq!(table.readings()[0].relative_humidity, Some(65.0));
        assert_eq!(table.readings()[1].temperature, None);
        assert_eq!(table.values(Variable::Temperature), vec![18.5, 14.0]);
        assert_eq!(table.time_span(), Some((ts(1, 12), ts(2, 6))));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let frame = sample_frame().drop("wind_speed_kmh").unwrap();
        match ReadingTable::from_frame(&frame) {
            Err(DataError::ColumnNotFound(name, _)) => assert_eq!(name, "wind_speed_kmh"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_string_timestamps_are_parsed() {
        let frame = df!(
            "datetime" => ["2024-04-01 10:00", "2024-04-01 11:00"],
            "temperature" => [10.0, 11.0],
            "relative_humidity" => [50.0, 51.0],
            "precipitation_mm" => [0.0, 0.0],
            "cloud_cover_octas" => [1.0, 1.0],
            "wind_speed_kmh" => [3.0, 3.0],
            "solar_radiation" => [400.0, 450.0],
        )
        .unwrap();
        let table = ReadingTable::from_frame(&frame).unwrap();
        assert!(!table.has_category());
        assert_eq!(table.readings()[1].datetime, ts(1, 11));
    }

    #[test]
    fn test_category_counts_order() {
        let counts = category_counts(&sample_frame()).unwrap().unwrap();
        assert_eq!(
            counts,
            vec![
                ("Templado".to_string(), 2),
                ("Lluvia Fuerte".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_category_counts_without_column() {
        let frame = sample_frame().drop("category").unwrap();
        assert_eq!(category_counts(&frame).unwrap(), None);
    }
}
