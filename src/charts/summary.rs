use crate::charts::axes::{index_at, split_by_ratios, TimeAxis};
use crate::charts::error::ChartError;
use crate::charts::period_grid::PeriodGridChart;
use crate::charts::style::ChartStyle;
use crate::charts::temperature::TemperatureChart;
use crate::icons::loader::IconSource;
use crate::types::forecast_point::ForecastPoint;
use chrono::NaiveDateTime;
use plotters::coord::Shift;
use plotters::prelude::*;

const PANEL_RATIOS: [f64; 3] = [1.0, 1.0, 1.5];

/// Predicted category per timestamp, with categories on the y axis in order of first
/// appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTimeline {
    categories: Vec<String>,
    points: Vec<(NaiveDateTime, usize)>,
}

impl CategoryTimeline {
    pub fn from_forecasts(forecasts: &[ForecastPoint]) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let points = forecasts
            .iter()
            .map(|f| {
                let index = match categories.iter().position(|c| *c == f.category) {
                    Some(index) => index,
                    None => {
                        categories.push(f.category.clone());
                        categories.len() - 1
                    }
                };
                (f.timestamp, index)
            })
            .collect();
        Self { categories, points }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn points(&self) -> &[(NaiveDateTime, usize)] {
        &self.points
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let Some(axis) = TimeAxis::spanning(self.points.iter().map(|(ts, _)| *ts)) else {
            return Err(ChartError::NoData("category timeline"));
        };
        let rows = self.categories.len().max(1);
        let mut chart = ChartBuilder::on(area)
            .caption("Categorías Predominantes", style.bold(15.0))
            .margin(style.px(12))
            .x_label_area_size(style.px(50))
            .y_label_area_size(style.px(150))
            .build_cartesian_2d(axis.range(), -0.5..rows as f64 - 0.5)?;

        let categories = &self.categories;
        let x_format = |x: &f64| axis.label(*x, "%Y-%m-%d %H:%M");
        let y_format = |y: &f64| {
            index_at(*y, categories.len())
                .map(|i| categories[i].clone())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .light_line_style(style.grid_color())
            .x_labels(6)
            .y_labels(rows * 2 + 1)
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .y_desc("Categorías")
            .label_style(style.font(10.0))
            .draw()?;

        let radius = style.line(4);
        chart.draw_series(
            self.points
                .iter()
                .map(|(ts, i)| Circle::new((axis.x(*ts), *i as f64), radius, BLUE.filled())),
        )?;
        Ok(())
    }
}

/// Temperature with confidence, predominant categories and the period grid, stacked.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryChart {
    temperature: TemperatureChart,
    timeline: CategoryTimeline,
    grid: PeriodGridChart,
}

impl SummaryChart {
    pub fn from_forecasts(
        forecasts: &[ForecastPoint],
        icons: &impl IconSource,
    ) -> Result<Self, ChartError> {
        Ok(Self {
            temperature: TemperatureChart::from_forecasts(forecasts)?,
            timeline: CategoryTimeline::from_forecasts(forecasts),
            grid: PeriodGridChart::from_forecasts(forecasts, icons)?,
        })
    }

    pub fn temperature(&self) -> &TemperatureChart {
        &self.temperature
    }

    pub fn timeline(&self) -> &CategoryTimeline {
        &self.timeline
    }

    pub fn grid(&self) -> &PeriodGridChart {
        &self.grid
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let panels = split_by_ratios(area, &PANEL_RATIOS);
        if let [top, middle, bottom] = panels.as_slice() {
            self.temperature.draw(top, style)?;
            self.timeline.draw(middle, style)?;
            self.grid.draw(bottom, style)?;
        }
        Ok(())
    }
}
