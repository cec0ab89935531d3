//! Coordinate helpers shared by the chart models: a numeric time axis, padded value
//! ranges and ratio-based panel splitting.

use chrono::{Duration, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

/// Maps timestamps onto `f64` hours since an origin, so that every chart can use a
/// plain numeric cartesian coordinate and format tick labels back into dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeAxis {
    origin: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeAxis {
    pub(crate) fn new(origin: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { origin, end }
    }

    /// Axis covering every timestamp yielded by `timestamps`.
    pub(crate) fn spanning(timestamps: impl IntoIterator<Item = NaiveDateTime>) -> Option<Self> {
        let mut iter = timestamps.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        Some(Self::new(min, max))
    }

    pub(crate) fn x(&self, timestamp: NaiveDateTime) -> f64 {
        (timestamp - self.origin).num_seconds() as f64 / 3600.0
    }

    pub(crate) fn at(&self, x: f64) -> NaiveDateTime {
        self.origin + Duration::seconds((x * 3600.0).round() as i64)
    }

    /// The x range of the axis; a single instant is widened by an hour on each side.
    pub(crate) fn range(&self) -> Range<f64> {
        let end = self.x(self.end);
        if end <= 0.0 {
            -1.0..1.0
        } else {
            0.0..end
        }
    }

    pub(crate) fn label(&self, x: f64, format: &str) -> String {
        self.at(x).format(format).to_string()
    }
}

/// A y range covering `values` with 5% headroom. Empty or constant input still yields a
/// non-empty range.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Like [`padded_range`] but anchored at zero, for quantities drawn as filled areas.
pub(crate) fn zero_based_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let padded = padded_range(values);
    0.0_f64.min(padded.start)..padded.end.max(1.0)
}

/// Splits `area` into stacked rows whose heights follow `ratios`.
pub(crate) fn split_by_ratios<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ratios: &[f64],
) -> Vec<DrawingArea<DB, Shift>> {
    let (_, height) = area.dim_in_pixel();
    area.split_by_breakpoints(Vec::<i32>::new(), ratio_breakpoints(height, ratios))
}

pub(crate) fn ratio_breakpoints(height: u32, ratios: &[f64]) -> Vec<i32> {
    let total: f64 = ratios.iter().sum();
    if ratios.len() < 2 || total <= 0.0 {
        return Vec::new();
    }
    let mut acc = 0.0;
    ratios[..ratios.len() - 1]
        .iter()
        .map(|r| {
            acc += r;
            (height as f64 * acc / total).round() as i32
        })
        .collect()
}

/// Rounds a category-axis coordinate to the index it labels, if it sits on one.
pub(crate) fn index_at(value: f64, len: usize) -> Option<usize> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded >= len as f64 {
        return None;
    }
    Some(rounded as usize)
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

    #[test]
    fn test_time_axis_roundtrips_labels() {
        let axis = TimeAxis::spanning([ts(2, 6), ts(1, 0), ts(3, 12)]).unwrap();
        assert_eq!(axis.range(), 0.0..60.0);
        assert_eq!(axis.x(ts(2, 6)), 30.0);
        assert_eq!(axis.label(30.0, "%Y-%m-%d %H:%M"), "2024-04-02 06:00");
    }

    #[test]
    fn test_single_instant_axis_is_not_empty() {
        let axis = TimeAxis::spanning([ts(1, 0)]).unwrap();
        assert_eq!(axis.range(), -1.0..1.0);
        assert!(TimeAxis::spanning(Vec::new()).is_none());
    }

    #[test]
    fn test_padded_ranges() {
        assert_eq!(padded_range([5.0, 5.0]), 4.0..6.0);
        assert_eq!(padded_range(Vec::new()), 0.0..1.0);
        let r = padded_range([0.0, 10.0, f64::NAN]);
        assert!((r.start + 0.5).abs() < 1e-9 && (r.end - 10.5).abs() < 1e-9);
        assert_eq!(zero_based_range([0.0, 0.0]).start, -1.0);
    }

    #[test]
    fn test_ratio_breakpoints() {
        assert_eq!(ratio_breakpoints(380, &[1.0, 0.8, 1.0, 1.0]), vec![100, 180, 280]);
        assert!(ratio_breakpoints(100, &[1.0]).is_empty());
    }

    #[test]
    fn test_index_at() {
        assert_eq!(index_at(2.0, 4), Some(2));
        assert_eq!(index_at(2.5, 4), None);
        assert_eq!(index_at(-0.0, 4), Some(0));
        assert_eq!(index_at(4.0, 4), None);
    }
}
