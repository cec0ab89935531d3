use crate::charts::axes::{padded_range, TimeAxis};
use crate::charts::error::ChartError;
use crate::charts::style::{rgb, ChartStyle};
use crate::types::forecast_point::ForecastPoint;
use chrono::NaiveDateTime;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Every n-th sample carries an `HH:MM` annotation.
pub const ANNOTATION_STRIDE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub confidence: f64,
}

/// Predicted temperature as a marked line with model confidence as a filled area on a
/// secondary `[0, 1]` axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureChart {
    samples: Vec<TemperatureSample>,
}

impl TemperatureChart {
    /// Samples are ordered by timestamp; the input slice is left untouched.
    pub fn from_forecasts(forecasts: &[ForecastPoint]) -> Result<Self, ChartError> {
        if forecasts.is_empty() {
            return Err(ChartError::NoData("temperature"));
        }
        let mut samples: Vec<TemperatureSample> = forecasts
            .iter()
            .map(|f| TemperatureSample {
                timestamp: f.timestamp,
                temperature: f.predicted_temperature,
                confidence: f.confidence,
            })
            .collect();
        samples.sort_by_key(|s| s.timestamp);
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[TemperatureSample] {
        &self.samples
    }

    /// The samples that get a time-of-day label.
    pub fn annotated(&self) -> impl Iterator<Item = &TemperatureSample> {
        self.samples.iter().step_by(ANNOTATION_STRIDE)
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let Some(axis) = TimeAxis::spanning(self.samples.iter().map(|s| s.timestamp)) else {
            return Err(ChartError::NoData("temperature"));
        };
        let x_range = axis.range();
        let y_range = padded_range(self.samples.iter().map(|s| s.temperature));
        let temperature = rgb(style.temperature);
        let confidence = rgb(style.confidence);
        let (swatch, swatch_half) = style.swatch();
        let stroke = style.line(2);

        let mut chart = ChartBuilder::on(area)
            .caption("Pronóstico de Temperatura y Confianza", style.bold(18.0))
            .margin(style.px(12))
            .x_label_area_size(style.px(60))
            .y_label_area_size(style.px(60))
            .right_y_label_area_size(style.px(60))
            .build_cartesian_2d(x_range.clone(), y_range)?
            .set_secondary_coord(x_range, 0.0..1.0);

        let x_format = |x: &f64| axis.label(*x, "%Y-%m-%d %H:%M");
        chart
            .configure_mesh()
            .light_line_style(style.grid_color())
            .x_labels(6)
            .x_label_formatter(&x_format)
            .y_desc("Temperatura (°C)")
            .label_style(style.font(11.0))
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc("Nivel de Confianza")
            .label_style(style.font(11.0))
            .draw()?;

        chart
            .draw_secondary_series(AreaSeries::new(
                self.samples
                    .iter()
                    .map(|s| (axis.x(s.timestamp), s.confidence.clamp(0.0, 1.0))),
                0.0,
                confidence.mix(0.2),
            ))?
            .label("Nivel de Confianza")
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - swatch_half), (x + swatch, y + swatch_half)],
                    confidence.mix(0.2).filled(),
                )
            });

        chart
            .draw_series(LineSeries::new(
                self.samples
                    .iter()
                    .map(|s| (axis.x(s.timestamp), s.temperature)),
                temperature.stroke_width(stroke),
            ))?
            .label("Temperatura")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], temperature.stroke_width(stroke))
            });
        chart.draw_series(self.samples.iter().map(|s| {
            Circle::new(
                (axis.x(s.timestamp), s.temperature),
                style.line(3),
                temperature.filled(),
            )
        }))?;

        let annotation = TextStyle::from(style.bold(9.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
        let lift = -(style.px(8) as i32);
        chart.draw_series(self.annotated().map(|s| {
            EmptyElement::at((axis.x(s.timestamp), s.temperature))
                + Text::new(
                    s.timestamp.format("%H:%M").to_string(),
                    (0, lift),
                    annotation.clone(),
                )
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .margin(style.px(5))
            .legend_area_size(style.px(30))
            .label_font(style.font(11.0))
            .draw()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(hour: u32, temperature: f64) -> ForecastPoint {
        let ts = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        ForecastPoint::new(ts, temperature, 0.8, "Templado")
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(matches!(
            TemperatureChart::from_forecasts(&[]),
            Err(ChartError::NoData(_))
        ));
    }

    #[test]
    fn test_every_sixth_sample_is_annotated() {
        let forecasts: Vec<_> = (0..14).rev().map(|h| point(h, h as f64)).collect();
        let chart = TemperatureChart::from_forecasts(&forecasts).unwrap();
        assert_eq!(chart.samples()[0].temperature, 0.0);
        let hours: Vec<f64> = chart.annotated().map(|s| s.temperature).collect();
        assert_eq!(hours, vec![0.0, 6.0, 12.0]);
        assert_eq!(forecasts[0].predicted_temperature, 13.0);
    }
}
