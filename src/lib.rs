mod charts;
mod config;
mod dashboard;
mod dataset;
mod error;
mod icons;
mod types;
mod utils;
mod visualizer;

pub use config::VisualizerConfig;
pub use error::VizError;
pub use visualizer::*;

pub use charts::distribution::{BoxStats, DistributionChart, BOXPLOT_VARIABLES};
pub use charts::figure::{save_report, Figure, FigureContent, BASE_DPI, DEFAULT_DPI, DEFAULT_REPORT_FILE};
pub use charts::period_grid::{GridCell, PeriodGridChart};
pub use charts::report::{ReportChart, REPORT_RATIOS, REPORT_TITLE};
pub use charts::style::{confidence_color, ChartStyle};
pub use charts::summary::{CategoryTimeline, SummaryChart};
pub use charts::temperature::{TemperatureChart, TemperatureSample, ANNOTATION_STRIDE};
pub use charts::time_series::TimeSeriesChart;
pub use charts::training::{MetricPanel, TrainingChart};

pub use dashboard::cell::*;
pub use dashboard::detail::*;
pub use dashboard::feedback::*;
pub use dashboard::host::*;
pub use dashboard::perception::{perception_for, technical_for, SELECTOR_OPTIONS};

pub use dataset::readings::{category_counts, ReadingTable};
pub use dataset::{load_forecasts_json, load_history_json, load_readings_csv};

pub use icons::icon::{Icon, IconKind};
pub use icons::loader::{IconLoader, IconSource};
pub use icons::resolver::{
    is_night, normalize_category, resolve_icon, select_icon, IconRule, IconSelection,
    NIGHT_END_HOUR, NIGHT_START_HOUR,
};

pub use types::color::HexColor;
pub use types::day_period::DayPeriod;
pub use types::forecast_point::ForecastPoint;
pub use types::into_timestamp::{IntoTimestamp, TIMESTAMP_FORMAT};
pub use types::reading::{Reading, Variable, CATEGORY_COLUMN, DATETIME_COLUMN};
pub use types::training_history::{TrainingHistory, ACCURACY, LOSS, VAL_ACCURACY, VAL_LOSS};

pub use charts::error::ChartError;
pub use dashboard::error::DashboardError;
pub use dataset::error::DataError;
pub use icons::error::IconError;
pub use utils::ICON_DIR_NAME;
