//! Defines [`ForecastPoint`], one record produced by the external forecasting model.

use crate::types::day_period::DayPeriod;
use crate::types::into_timestamp::TIMESTAMP_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single forecast record: when, how warm, how sure, and what kind of weather.
///
/// The model that produces these records is external; this crate only reads them.
/// Deserialization accepts both the English field names and the names used by the
/// forecasting pipeline (`fecha`, `temperatura`, `confianza`, `categoria`), and
/// timestamps either as `YYYY-MM-DD HH:MM[:SS]` or RFC 3339-like `YYYY-MM-DDTHH:MM:SS`.
///
/// # Examples
///
/// ```
/// use microclima::{DayPeriod, ForecastPoint};
///
/// let json = r#"{"fecha": "2024-05-02 19:00", "temperatura": 15.2, "confianza": 0.81, "categoria": "Templado"}"#;
/// let point: ForecastPoint = serde_json::from_str(json).unwrap();
/// assert_eq!(point.period(), DayPeriod::Noche);
/// assert_eq!(point.category, "Templado");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(alias = "fecha", deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(alias = "temperatura", alias = "temperature")]
    pub predicted_temperature: f64,
    /// Model confidence in `[0, 1]`.
    #[serde(alias = "confianza")]
    pub confidence: f64,
    /// Free-text category label, e.g. `"Cálido + Muy Nublado"`.
    #[serde(alias = "categoria")]
    pub category: String,
}

impl ForecastPoint {
    pub fn new(
        timestamp: NaiveDateTime,
        predicted_temperature: f64,
        confidence: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            predicted_temperature,
            confidence,
            category: category.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn period(&self) -> DayPeriod {
        DayPeriod::of(&self.timestamp)
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognised timestamp '{raw}'"))
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_deserialize_english_names() {
        let json = r#"{"timestamp": "2024-05-02T03:15:00", "predicted_temperature": 11.0, "confidence": 0.4, "category": "Frío"}"#;
        let point: ForecastPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.timestamp.hour(), 3);
        assert_eq!(point.timestamp.minute(), 15);
        assert_eq!(point.period(), DayPeriod::Madrugada);
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let json = r#"{"fecha": "tomorrow", "temperatura": 1.0, "confianza": 0.5, "categoria": "Frío"}"#;
        assert!(serde_json::from_str::<ForecastPoint>(json).is_err());
    }

    #[test]
    fn test_date_only_timestamp_is_midnight() {
        let ts = parse_timestamp("2024-01-31").unwrap();
        assert_eq!(ts.hour(), 0);
    }
}
