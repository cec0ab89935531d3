use crate::charts::axes::split_by_ratios;
use crate::charts::distribution::DistributionChart;
use crate::charts::error::ChartError;
use crate::charts::style::ChartStyle;
use crate::charts::summary::SummaryChart;
use crate::charts::time_series::TimeSeriesChart;
use crate::charts::training::TrainingChart;
use plotters::coord::Shift;
use plotters::prelude::*;

pub const REPORT_TITLE: &str = "Reporte Completo de Análisis Climático";

/// Height ratios of the report sections, top to bottom.
pub const REPORT_RATIOS: [f64; 4] = [1.2, 1.0, 1.0, 1.0];

/// Every chart of an analysis run stacked into one figure. The training section is
/// only laid out when a history was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportChart {
    pub time_series: TimeSeriesChart,
    pub distribution: DistributionChart,
    pub summary: SummaryChart,
    pub training: Option<TrainingChart>,
}

impl ReportChart {
    pub fn section_ratios(&self) -> &'static [f64] {
        if self.training.is_some() {
            &REPORT_RATIOS
        } else {
            &REPORT_RATIOS[..3]
        }
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let sections = split_by_ratios(area, self.section_ratios());
        let mut sections = sections.iter();
        if let Some(section) = sections.next() {
            self.time_series.draw(section, style)?;
        }
        if let Some(section) = sections.next() {
            self.distribution.draw(section, style)?;
        }
        if let Some(section) = sections.next() {
            self.summary.draw(section, style)?;
        }
        if let (Some(section), Some(training)) = (sections.next(), &self.training) {
            training.draw(section, style)?;
        }
        Ok(())
    }
}
