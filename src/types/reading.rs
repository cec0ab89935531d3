//! Historical readings: the column schema of the readings `DataFrame` and the
//! row type extracted from it.

use chrono::NaiveDateTime;
use std::fmt;

/// The numeric variables of a reading, in the order the time-series panels use them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Temperature,
    RelativeHumidity,
    Precipitation,
    CloudCover,
    WindSpeed,
    SolarRadiation,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::Temperature,
        Variable::RelativeHumidity,
        Variable::Precipitation,
        Variable::CloudCover,
        Variable::WindSpeed,
        Variable::SolarRadiation,
    ];

    /// Column name in the readings `DataFrame`.
    pub fn column(self) -> &'static str {
        match self {
            Variable::Temperature => "temperature",
            Variable::RelativeHumidity => "relative_humidity",
            Variable::Precipitation => "precipitation_mm",
            Variable::CloudCover => "cloud_cover_octas",
            Variable::WindSpeed => "wind_speed_kmh",
            Variable::SolarRadiation => "solar_radiation",
        }
    }

    /// Short Spanish label used in legends and boxplot ticks.
    pub fn label(self) -> &'static str {
        match self {
            Variable::Temperature => "Temperatura",
            Variable::RelativeHumidity => "Humedad",
            Variable::Precipitation => "Precipitación",
            Variable::CloudCover => "Cobertura Nubes",
            Variable::WindSpeed => "Velocidad Viento",
            Variable::SolarRadiation => "Radiación",
        }
    }

    /// Axis description including the unit.
    pub fn axis_label(self) -> &'static str {
        match self {
            Variable::Temperature => "Temperatura (°C)",
            Variable::RelativeHumidity => "Humedad (%)",
            Variable::Precipitation => "Precipitación (mm)",
            Variable::CloudCover => "Cobertura de Nubes (octas)",
            Variable::WindSpeed => "Velocidad del Viento (km/h)",
            Variable::SolarRadiation => "Radiación Solar (J/m²)",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Name of the timestamp column.
pub const DATETIME_COLUMN: &str = "datetime";
/// Name of the optional category column.
pub const CATEGORY_COLUMN: &str = "category";

/// One historical observation. Missing values stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub datetime: NaiveDateTime,
    pub temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub cloud_cover_octas: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub category: Option<String>,
}

impl Reading {
    pub fn value(&self, variable: Variable) -> Option<f64> {
        match variable {
            Variable::Temperature => self.temperature,
            Variable::RelativeHumidity => self.relative_humidity,
            Variable::Precipitation => self.precipitation_mm,
            Variable::CloudCover => self.cloud_cover_octas,
            Variable::WindSpeed => self.wind_speed_kmh,
            Variable::SolarRadiation => self.solar_radiation,
        }
    }
}
