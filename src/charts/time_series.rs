use crate::charts::axes::{padded_range, split_by_ratios, zero_based_range, TimeAxis};
use crate::charts::error::ChartError;
use crate::charts::style::ChartStyle;
use crate::dataset::readings::ReadingTable;
use crate::types::reading::Variable;
use chrono::NaiveDateTime;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Height ratios of the four stacked panels.
pub const PANEL_RATIOS: [f64; 4] = [1.0, 0.8, 1.0, 1.0];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The four stacked panels of the readings overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Two variables on twin y axes.
    Twin {
        title: &'static str,
        left: Variable,
        right: Variable,
    },
    /// One variable drawn as a line over a filled area.
    Filled {
        title: &'static str,
        variable: Variable,
    },
}

pub const PANELS: [Panel; 4] = [
    Panel::Twin {
        title: "Temperatura y Humedad",
        left: Variable::Temperature,
        right: Variable::RelativeHumidity,
    },
    Panel::Filled {
        title: "Precipitación",
        variable: Variable::Precipitation,
    },
    Panel::Twin {
        title: "Cobertura de Nubes y Viento",
        left: Variable::CloudCover,
        right: Variable::WindSpeed,
    },
    Panel::Filled {
        title: "Radiación Solar",
        variable: Variable::SolarRadiation,
    },
];

/// Multi-panel time series of every reading variable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesChart {
    axis: TimeAxis,
    series: Vec<Vec<(NaiveDateTime, f64)>>,
}

impl TimeSeriesChart {
    pub fn from_readings(table: &ReadingTable) -> Result<Self, ChartError> {
        let (start, end) = table.time_span().ok_or(ChartError::NoData("time series"))?;
        Ok(Self {
            axis: TimeAxis::new(start, end),
            series: Variable::ALL.iter().map(|v| table.series(*v)).collect(),
        })
    }

    /// Non-null samples of one variable, in time order.
    pub fn series(&self, variable: Variable) -> &[(NaiveDateTime, f64)] {
        self.series
            .get(variable as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        for (panel, panel_area) in PANELS.iter().zip(split_by_ratios(area, &PANEL_RATIOS)) {
            match *panel {
                Panel::Twin { title, left, right } => {
                    self.draw_twin(&panel_area, style, title, left, right)?
                }
                Panel::Filled { title, variable } => {
                    self.draw_filled(&panel_area, style, title, variable)?
                }
            }
        }
        Ok(())
    }

    fn points(&self, variable: Variable) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series(variable)
            .iter()
            .map(move |(ts, v)| (self.axis.x(*ts), *v))
    }

    fn draw_twin<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        title: &str,
        left: Variable,
        right: Variable,
    ) -> Result<(), ChartError> {
        let x_range = self.axis.range();
        let left_color = style.variable_color(left);
        let right_color = style.variable_color(right);
        let (swatch, _) = style.swatch();
        let stroke = style.line(2);

        let mut chart = ChartBuilder::on(area)
            .caption(title, style.bold(15.0))
            .margin(style.px(10))
            .x_label_area_size(style.px(40))
            .y_label_area_size(style.px(60))
            .right_y_label_area_size(style.px(60))
            .build_cartesian_2d(
                x_range.clone(),
                padded_range(self.series(left).iter().map(|(_, v)| *v)),
            )?
            .set_secondary_coord(
                x_range,
                padded_range(self.series(right).iter().map(|(_, v)| *v)),
            );

        let x_format = |x: &f64| self.axis.label(*x, DATE_FORMAT);
        chart
            .configure_mesh()
            .light_line_style(style.grid_color())
            .x_label_formatter(&x_format)
            .y_desc(left.axis_label())
            .label_style(style.font(10.0))
            .axis_desc_style(style.font(11.0).color(&left_color))
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc(right.axis_label())
            .label_style(style.font(10.0))
            .axis_desc_style(style.font(11.0).color(&right_color))
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                self.points(left),
                left_color.stroke_width(stroke),
            ))?
            .label(left.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], left_color.stroke_width(stroke))
            });
        chart
            .draw_secondary_series(LineSeries::new(
                self.points(right),
                right_color.stroke_width(stroke),
            ))?
            .label(right.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], right_color.stroke_width(stroke))
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .margin(style.px(5))
            .legend_area_size(style.px(30))
            .label_font(style.font(10.0))
            .draw()?;
        Ok(())
    }

    fn draw_filled<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
        title: &str,
        variable: Variable,
    ) -> Result<(), ChartError> {
        let color = style.variable_color(variable);
        let (swatch, swatch_half) = style.swatch();
        let mut chart = ChartBuilder::on(area)
            .caption(title, style.bold(15.0))
            .margin(style.px(10))
            .x_label_area_size(style.px(40))
            .y_label_area_size(style.px(60))
            .right_y_label_area_size(style.px(60))
            .build_cartesian_2d(
                self.axis.range(),
                zero_based_range(self.series(variable).iter().map(|(_, v)| *v)),
            )?;

        let x_format = |x: &f64| self.axis.label(*x, DATE_FORMAT);
        chart
            .configure_mesh()
            .light_line_style(style.grid_color())
            .x_label_formatter(&x_format)
            .y_desc(variable.axis_label())
            .label_style(style.font(10.0))
            .draw()?;

        chart
            .draw_series(
                AreaSeries::new(self.points(variable), 0.0, color.mix(0.3))
                    .border_style(color.stroke_width(style.line(2))),
            )?
            .label(variable.label())
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y - swatch_half), (x + swatch, y + swatch_half)],
                    color.filled(),
                )
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .margin(style.px(5))
            .legend_area_size(style.px(30))
            .label_font(style.font(10.0))
            .draw()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_series_skip_nulls() {
        let frame = df!(
            "datetime" => ["2024-01-01 00:00", "2024-01-01 01:00", "2024-01-01 02:00"],
            "temperature" => [Some(1.0), None, Some(3.0)],
            "relative_humidity" => [80.0, 81.0, 82.0],
            "precipitation_mm" => [0.0, 0.5, 0.0],
            "cloud_cover_octas" => [1i64, 2, 3],
            "wind_speed_kmh" => [3.0, 4.0, 5.0],
            "solar_radiation" => [0.0, 0.0, 10.0]
        )
        .unwrap();
        let table = ReadingTable::from_frame(&frame).unwrap();
        let chart = TimeSeriesChart::from_readings(&table).unwrap();

        assert_eq!(chart.series(Variable::Temperature).len(), 2);
        assert_eq!(chart.series(Variable::CloudCover).len(), 3);
        assert_eq!(chart.axis.range(), 0.0..2.0);
    }

    #[test]
    fn test_empty_table_is_no_data() {
        assert!(matches!(
            TimeSeriesChart::from_readings(&ReadingTable::default()),
            Err(ChartError::NoData(_))
        ));
    }

    #[test]
    fn test_panel_layout() {
        assert_eq!(PANELS.len(), PANEL_RATIOS.len());
        assert!(matches!(
            PANELS[0],
            Panel::Twin {
                left: Variable::Temperature,
                right: Variable::RelativeHumidity,
                ..
            }
        ));
    }
}
