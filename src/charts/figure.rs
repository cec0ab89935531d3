//! The renderable [`Figure`] returned by every chart builder, and report saving.

use crate::charts::distribution::DistributionChart;
use crate::charts::error::ChartError;
use crate::charts::period_grid::PeriodGridChart;
use crate::charts::report::ReportChart;
use crate::charts::style::ChartStyle;
use crate::charts::summary::SummaryChart;
use crate::charts::temperature::TemperatureChart;
use crate::charts::time_series::TimeSeriesChart;
use crate::charts::training::TrainingChart;
use log::{error, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Default DPI used when saving reports.
pub const DEFAULT_DPI: u32 = 300;

/// DPI at which chart font sizes and pixel measures are given as written.
pub const BASE_DPI: u32 = 100;

/// Default file name for saved reports.
pub const DEFAULT_REPORT_FILE: &str = "reporte_climatico.png";

/// The prepared chart a figure renders.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureContent {
    Temperature(TemperatureChart),
    PeriodGrid(PeriodGridChart),
    TimeSeries(TimeSeriesChart),
    Distribution(DistributionChart),
    Training(TrainingChart),
    Summary(SummaryChart),
    Report(Box<ReportChart>),
}

impl FigureContent {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        match self {
            FigureContent::Temperature(chart) => chart.draw(area, style),
            FigureContent::PeriodGrid(chart) => chart.draw(area, style),
            FigureContent::TimeSeries(chart) => chart.draw(area, style),
            FigureContent::Distribution(chart) => chart.draw(area, style),
            FigureContent::Training(chart) => chart.draw(area, style),
            FigureContent::Summary(chart) => chart.draw(area, style),
            FigureContent::Report(chart) => chart.draw(area, style),
        }
    }
}

/// A chart ready to be rendered: its content, physical size and style.
///
/// Building a figure never touches the filesystem; rendering happens in
/// [`Figure::render`] or [`save_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: Option<String>,
    size_inches: (f64, f64),
    style: ChartStyle,
    content: FigureContent,
}

impl Figure {
    pub fn new(content: FigureContent, size_inches: (f64, f64), style: ChartStyle) -> Self {
        Self {
            title: None,
            size_inches,
            style,
            content,
        }
    }

    /// Adds a figure-level title above the content.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn size_inches(&self) -> (f64, f64) {
        self.size_inches
    }

    pub fn content(&self) -> &FigureContent {
        &self.content
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Pixel dimensions at `dpi`.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let scale = |inches: f64| ((inches * dpi as f64).round() as u32).max(1);
        (scale(self.size_inches.0), scale(self.size_inches.1))
    }

    /// Draws the figure onto any plotters drawing area sized for `dpi`.
    ///
    /// Text, margins, markers and strokes grow with `dpi / BASE_DPI`, so the layout is
    /// the same at every resolution.
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        dpi: u32,
    ) -> Result<(), ChartError> {
        let style = self.style.scaled(dpi as f64 / BASE_DPI as f64);
        root.fill(&WHITE)?;
        let body = match &self.title {
            Some(title) => root.titled(title, style.bold(28.0))?,
            None => root.clone(),
        };
        self.content.draw(&body, &style)
    }

    /// Renders to `path` at `dpi`: SVG for a `.svg` extension, PNG (or whatever bitmap
    /// format the extension names) otherwise.
    pub fn render(&self, path: &Path, dpi: u32) -> Result<(), ChartError> {
        let size = self.pixel_size(dpi);
        if is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            self.draw(&root, dpi)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            self.draw(&root, dpi)?;
            root.present()?;
        }
        Ok(())
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Saves `figure` to `path`, returning whether it succeeded.
///
/// Failures are logged, never raised.
pub fn save_report(figure: &Figure, path: impl AsRef<Path>, dpi: u32) -> bool {
    let path = path.as_ref();
    match figure.render(path, dpi) {
        Ok(()) => {
            info!("Report saved to {:?}", path);
            true
        }
        Err(e) => {
            error!("Failed to save report to {:?}: {}", path, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::training_history::{TrainingHistory, ACCURACY, LOSS, VAL_ACCURACY, VAL_LOSS};

    fn training_figure() -> Figure {
        let history = TrainingHistory::new()
            .with_series(LOSS, vec![1.0, 0.6, 0.4])
            .with_series(VAL_LOSS, vec![1.2, 0.8, 0.7])
            .with_series(ACCURACY, vec![0.4, 0.6, 0.7])
            .with_series(VAL_ACCURACY, vec![0.3, 0.5, 0.6]);
        Figure::new(
            FigureContent::Training(TrainingChart::from_history(&history).unwrap()),
            (12.0, 5.0),
            ChartStyle::default(),
        )
    }

    #[test]
    fn test_pixel_size_follows_dpi() {
        let figure = training_figure();
        assert_eq!(figure.pixel_size(DEFAULT_DPI), (3600, 1500));
        assert_eq!(figure.pixel_size(10), (120, 50));
    }

    #[test]
    fn test_svg_detection() {
        assert!(is_svg(Path::new("out/report.SVG")));
        assert!(!is_svg(Path::new(DEFAULT_REPORT_FILE)));
        assert!(!is_svg(Path::new("report")));
    }

    #[test]
    fn test_unwritable_path_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("nested").join("report.png");
        assert!(!save_report(&training_figure(), &target, 40));
        assert!(!target.exists());
    }
}
