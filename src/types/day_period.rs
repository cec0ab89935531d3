//! Defines [`DayPeriod`], the four fixed six-hour buckets a forecast day is split into,
//! together with the per-period constants the detail dashboard relies on.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// One of the four six-hour buckets of a day.
///
/// Buckets are half-open on the upper edge: hour 6 belongs to [`DayPeriod::Manana`],
/// hour 0 to [`DayPeriod::Madrugada`].
///
/// # Examples
///
/// ```
/// use microclima::DayPeriod;
///
/// assert_eq!(DayPeriod::from_hour(0), DayPeriod::Madrugada);
/// assert_eq!(DayPeriod::from_hour(6), DayPeriod::Manana);
/// assert_eq!(DayPeriod::from_hour(23), DayPeriod::Noche);
/// assert_eq!(DayPeriod::Manana.to_string(), "Mañana");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayPeriod {
    /// 00:00 – 05:59
    Madrugada,
    /// 06:00 – 11:59
    Manana,
    /// 12:00 – 17:59
    Tarde,
    /// 18:00 – 23:59
    Noche,
}

impl DayPeriod {
    /// All periods in display order (top to bottom in the grids).
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Madrugada,
        DayPeriod::Manana,
        DayPeriod::Tarde,
        DayPeriod::Noche,
    ];

    /// Buckets an hour of the day. Hours outside `0..24` are reduced modulo 24.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            0..=5 => DayPeriod::Madrugada,
            6..=11 => DayPeriod::Manana,
            12..=17 => DayPeriod::Tarde,
            _ => DayPeriod::Noche,
        }
    }

    /// Buckets any chrono value that carries a time of day.
    pub fn of(time: &impl Timelike) -> Self {
        Self::from_hour(time.hour())
    }

    /// Position of the period in [`DayPeriod::ALL`].
    pub fn index(self) -> usize {
        match self {
            DayPeriod::Madrugada => 0,
            DayPeriod::Manana => 1,
            DayPeriod::Tarde => 2,
            DayPeriod::Noche => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Madrugada => "Madrugada",
            DayPeriod::Manana => "Mañana",
            DayPeriod::Tarde => "Tarde",
            DayPeriod::Noche => "Noche",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            DayPeriod::Madrugada => "🌙",
            DayPeriod::Manana => "🌄",
            DayPeriod::Tarde => "☀️",
            DayPeriod::Noche => "🌠",
        }
    }

    /// Time used to place a cell that has no forecast rows.
    pub fn representative_time(self) -> NaiveTime {
        let hour = match self {
            DayPeriod::Madrugada => 3,
            DayPeriod::Manana => 9,
            DayPeriod::Tarde => 15,
            DayPeriod::Noche => 21,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Category shown for a cell without forecast coverage.
    pub fn fallback_category(self) -> &'static str {
        match self {
            DayPeriod::Madrugada => "Frío",
            DayPeriod::Manana => "Parcialmente Nublado",
            DayPeriod::Tarde => "Normal",
            DayPeriod::Noche => "Muy Nublado",
        }
    }

    /// Temperature (°C) shown for a cell without forecast coverage.
    pub fn fallback_temperature(self) -> f64 {
        match self {
            DayPeriod::Madrugada => 12.9,
            DayPeriod::Manana => 16.8,
            DayPeriod::Tarde => 17.1,
            DayPeriod::Noche => 14.3,
        }
    }

    /// Inclusive `(min, max)` band a displayed temperature is clamped into.
    pub fn temperature_band(self) -> (f64, f64) {
        match self {
            DayPeriod::Madrugada => (11.5, 14.0),
            DayPeriod::Manana => (15.5, 18.0),
            DayPeriod::Tarde => (16.0, 18.5),
            DayPeriod::Noche => (13.0, 15.5),
        }
    }

    /// Clamps a raw mean temperature into [`DayPeriod::temperature_band`].
    pub fn clamp_temperature(self, raw: f64) -> f64 {
        let (low, high) = self.temperature_band();
        raw.max(low).min(high)
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
