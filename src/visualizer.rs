//! The main entry point: chart builders, report saving, icon lookup and the detail
//! dashboard, all sharing one [`VisualizerConfig`].

use crate::charts::distribution::DistributionChart;
use crate::charts::figure::{Figure, FigureContent, DEFAULT_REPORT_FILE};
use crate::charts::period_grid::PeriodGridChart;
use crate::charts::report::{ReportChart, REPORT_TITLE};
use crate::charts::summary::SummaryChart;
use crate::charts::temperature::TemperatureChart;
use crate::charts::time_series::TimeSeriesChart;
use crate::charts::training::TrainingChart;
use crate::config::VisualizerConfig;
use crate::dashboard::detail::{DashboardSession, DetailDashboard};
use crate::dashboard::feedback::FeedbackSink;
use crate::dashboard::host::DashboardHost;
use crate::dataset::readings::ReadingTable;
use crate::error::VizError;
use crate::icons::icon::{Icon, IconKind};
use crate::icons::loader::IconLoader;
use crate::icons::resolver;
use crate::types::forecast_point::ForecastPoint;
use crate::types::into_timestamp::IntoTimestamp;
use crate::types::training_history::TrainingHistory;
use bon::bon;
use chrono::{Local, NaiveDate};
use log::error;
use polars::prelude::DataFrame;
use std::backtrace::Backtrace;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

const TEMPERATURE_SIZE: (f64, f64) = (12.0, 6.0);
const PERIOD_GRID_SIZE: (f64, f64) = (12.0, 6.0);
const TIME_SERIES_SIZE: (f64, f64) = (12.0, 15.0);
const DISTRIBUTION_SIZE: (f64, f64) = (12.0, 8.0);
const TRAINING_SIZE: (f64, f64) = (12.0, 5.0);
const SUMMARY_SIZE: (f64, f64) = (14.0, 10.0);
const REPORT_SIZE: (f64, f64) = (15.0, 25.0);

/// Renders forecasts and readings as charts and drives the detail dashboard.
///
/// Chart builders only prepare a [`Figure`]; nothing touches the filesystem until the
/// figure is rendered or saved with [`Visualizer::save_report`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use microclima::{ForecastPoint, Visualizer};
///
/// let visualizer = Visualizer::new();
/// let at = |h| NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// let forecasts = vec![
///     ForecastPoint::new(at(8), 16.5, 0.82, "Templado"),
///     ForecastPoint::new(at(14), 18.0, 0.64, "Cálido + Parcialmente Nublado"),
/// ];
///
/// let figure = visualizer.temperature_chart(&forecasts)?;
/// assert_eq!(figure.pixel_size(100), (1200, 600));
/// # Ok::<(), microclima::VizError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Visualizer {
    config: VisualizerConfig,
    icons: IconLoader,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl Visualizer {
    /// Visualizer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(VisualizerConfig::default())
    }

    pub fn with_config(config: VisualizerConfig) -> Self {
        Self {
            icons: IconLoader::new(config.icon_dir.clone(), config.icon_dir_name.clone()),
            config,
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn icon_loader(&self) -> &IconLoader {
        &self.icons
    }

    /// Looks up the icon for a weather category, night-aware when a timestamp is given.
    ///
    /// Returns `None` when the icon directory or the selected file is missing; the
    /// reason is logged.
    pub fn resolve_icon(&self, category: &str, timestamp: impl IntoTimestamp) -> Option<Icon> {
        resolver::resolve_icon(&self.icons, category, timestamp)
    }

    /// Loads one icon file from the icon directory.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Icon`] if no icon directory exists or the file cannot be
    /// decoded.
    pub fn load_icon(&self, kind: IconKind) -> Result<Icon, VizError> {
        Ok(self.icons.try_load(kind)?)
    }

    fn figure(&self, content: FigureContent, size_inches: (f64, f64)) -> Figure {
        Figure::new(content, size_inches, self.config.style.clone())
    }

    /// Predicted temperature with the model's confidence on a secondary axis.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Chart`] if `forecasts` is empty.
    pub fn temperature_chart(&self, forecasts: &[ForecastPoint]) -> Result<Figure, VizError> {
        let chart = TemperatureChart::from_forecasts(forecasts)?;
        Ok(self.figure(FigureContent::Temperature(chart), TEMPERATURE_SIZE))
    }

    /// Date × period grid coloured by mean confidence, with an icon per cell.
    pub fn detailed_forecast_chart(&self, forecasts: &[ForecastPoint]) -> Result<Figure, VizError> {
        let chart = PeriodGridChart::from_forecasts(forecasts, &self.icons)?;
        Ok(self.figure(FigureContent::PeriodGrid(chart), PERIOD_GRID_SIZE))
    }

    /// Four stacked panels covering every reading variable.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Data`] if a required column is missing or mistyped, and
    /// [`VizError::Chart`] if the table has no rows.
    pub fn time_series_chart(&self, readings: &DataFrame) -> Result<Figure, VizError> {
        let table = ReadingTable::from_frame(readings)?;
        let chart = TimeSeriesChart::from_readings(&table)?;
        Ok(self.figure(FigureContent::TimeSeries(chart), TIME_SERIES_SIZE))
    }

    /// Category histogram over boxplots of the main variables.
    pub fn distribution_chart(&self, readings: &DataFrame) -> Result<Figure, VizError> {
        let table = ReadingTable::from_frame(readings)?;
        let chart = DistributionChart::from_readings(readings, &table)?;
        Ok(self.figure(FigureContent::Distribution(chart), DISTRIBUTION_SIZE))
    }

    pub fn training_metrics_chart(&self, history: &TrainingHistory) -> Result<Figure, VizError> {
        let chart = TrainingChart::from_history(history)?;
        Ok(self.figure(FigureContent::Training(chart), TRAINING_SIZE))
    }

    /// Temperature, predominant categories and the period grid, stacked.
    pub fn prediction_summary_chart(&self, forecasts: &[ForecastPoint]) -> Result<Figure, VizError> {
        let chart = SummaryChart::from_forecasts(forecasts, &self.icons)?;
        Ok(self.figure(FigureContent::Summary(chart), SUMMARY_SIZE))
    }

    /// Every chart of an analysis run in one titled figure.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.readings(&DataFrame)`: **Required.** Historical readings.
    /// * `.forecasts(&[ForecastPoint])`: **Required.** Model forecasts.
    /// * `.history(&TrainingHistory)`: Optional. Adds the training metrics section.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use microclima::{Visualizer, VizError, load_readings_csv, load_forecasts_json};
    /// # fn run() -> Result<(), VizError> {
    /// let visualizer = Visualizer::new();
    /// let readings = load_readings_csv("datos.csv")?;
    /// let forecasts = load_forecasts_json("pronostico.json")?;
    ///
    /// let report = visualizer
    ///     .full_report()
    ///     .readings(&readings)
    ///     .forecasts(&forecasts)
    ///     .call()?;
    /// visualizer.save_report().figure(&report).path("reporte.png").call();
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn full_report(
        &self,
        readings: &DataFrame,
        forecasts: &[ForecastPoint],
        history: Option<&TrainingHistory>,
    ) -> Result<Figure, VizError> {
        let table = ReadingTable::from_frame(readings)?;
        let report = ReportChart {
            time_series: TimeSeriesChart::from_readings(&table)?,
            distribution: DistributionChart::from_readings(readings, &table)?,
            summary: SummaryChart::from_forecasts(forecasts, &self.icons)?,
            training: history.map(TrainingChart::from_history).transpose()?,
        };
        Ok(self
            .figure(FigureContent::Report(Box::new(report)), REPORT_SIZE)
            .with_title(REPORT_TITLE))
    }

    /// Saves `figure`, returning whether it succeeded. Failures are logged.
    ///
    /// The path defaults to `reporte_climatico.png` and the DPI to the configured
    /// `report_dpi`.
    #[builder]
    pub fn save_report(
        &self,
        figure: &Figure,
        #[builder(into)] path: Option<PathBuf>,
        dpi: Option<u32>,
    ) -> bool {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));
        crate::charts::figure::save_report(figure, &path, dpi.unwrap_or(self.config.report_dpi))
    }

    /// Clears `host` and fills it with the interactive detail dashboard.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.host(&mut impl DashboardHost)`: **Required.** The GUI container to fill.
    /// * `.forecasts(&[ForecastPoint])`: **Required.** Forecasts to lay out.
    /// * `.sink(Rc<dyn FeedbackSink>)`: **Required.** Receives the user's corrections.
    /// * `.generated_on(NaiveDate)`: Optional. Date shown in the header, today by default.
    ///
    /// # Returns
    ///
    /// The session holding every cell's correction state, or `None` if building failed.
    /// Failures are logged and reported through [`DashboardHost::show_error`]; widgets
    /// added before the failure are left in place.
    #[builder]
    pub fn show_detail_dashboard<H: DashboardHost>(
        &self,
        host: &mut H,
        forecasts: &[ForecastPoint],
        sink: Rc<dyn FeedbackSink>,
        generated_on: Option<NaiveDate>,
    ) -> Option<DashboardSession> {
        let generated_on = generated_on.unwrap_or_else(|| Local::now().date_naive());
        match self.build_dashboard(host, forecasts, sink, generated_on) {
            Ok(session) => Some(session),
            Err(e) => {
                error!("Failed to build detail dashboard: {}", e);
                let mut source = e.source();
                while let Some(cause) = source {
                    error!("  caused by: {}", cause);
                    source = cause.source();
                }
                error!("{}", Backtrace::capture());
                host.show_error(&format!("Error al actualizar gráfica: {e}"));
                None
            }
        }
    }

    fn build_dashboard<H: DashboardHost>(
        &self,
        host: &mut H,
        forecasts: &[ForecastPoint],
        sink: Rc<dyn FeedbackSink>,
        generated_on: NaiveDate,
    ) -> Result<DashboardSession, VizError> {
        let dashboard =
            DetailDashboard::new(forecasts, &self.icons, self.config.icon_size, generated_on)?;
        Ok(dashboard.populate(host, sink)?)
    }
}
