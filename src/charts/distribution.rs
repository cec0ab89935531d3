use crate::charts::axes::{index_at, padded_range, split_by_ratios};
use crate::charts::error::ChartError;
use crate::charts::style::ChartStyle;
use crate::dataset::readings::{category_counts, ReadingTable};
use crate::types::reading::Variable;
use ordered_float::OrderedFloat;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;

/// Variables shown as boxplots below the category histogram.
pub const BOXPLOT_VARIABLES: [Variable; 4] = [
    Variable::Temperature,
    Variable::RelativeHumidity,
    Variable::Precipitation,
    Variable::SolarRadiation,
];

const PANEL_RATIOS: [f64; 2] = [1.5, 1.0];
const BAR_WIDTH: f64 = 0.8;
const BOX_WIDTH: f64 = 0.5;

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest sample within `q1 - 1.5·IQR`.
    pub whisker_low: f64,
    /// Largest sample within `q3 + 1.5·IQR`.
    pub whisker_high: f64,
    /// Samples beyond the whiskers.
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Computes the summary of the finite values in `values`; `None` if there are none.
    ///
    /// Quartiles use linear interpolation between closest ranks.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<OrderedFloat<f64>> = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| OrderedFloat(*v))
            .collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort();
        let sorted: Vec<f64> = sorted.into_iter().map(|v| v.into_inner()).collect();

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().filter(|v| **v >= low_fence && **v <= high_fence);
        let whisker_low = inside.clone().next().copied().unwrap_or(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3);
        let fliers = sorted
            .iter()
            .filter(|v| **v < low_fence || **v > high_fence)
            .copied()
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }

    fn extent(&self) -> impl Iterator<Item = f64> + '_ {
        [self.whisker_low, self.whisker_high]
            .into_iter()
            .chain(self.fliers.iter().copied())
    }
}

fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// Category histogram over boxplots of the main variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionChart {
    /// `None` when the readings have no category column.
    categories: Option<Vec<(String, u64)>>,
    boxes: Vec<(Variable, Option<BoxStats>)>,
}

impl DistributionChart {
    pub fn from_readings(frame: &DataFrame, table: &ReadingTable) -> Result<Self, ChartError> {
        if table.is_empty() {
            return Err(ChartError::NoData("distribution"));
        }
        Ok(Self {
            categories: category_counts(frame)?,
            boxes: BOXPLOT_VARIABLES
                .iter()
                .map(|v| (*v, BoxStats::from_values(&table.values(*v))))
                .collect(),
        })
    }

    /// Category counts, most frequent first.
    pub fn categories(&self) -> Option<&[(String, u64)]> {
        self.categories.as_deref()
    }

    pub fn box_stats(&self, variable: Variable) -> Option<&BoxStats> {
        self.boxes
            .iter()
            .find(|(v, _)| *v == variable)
            .and_then(|(_, stats)| stats.as_ref())
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let panels = split_by_ratios(area, &PANEL_RATIOS);
        if let (Some(top), Some(counts)) = (panels.first(), &self.categories) {
            draw_histogram(top, style, counts)?;
        }
        if let Some(bottom) = panels.get(1) {
            self.draw_boxplots(bottom, style)?;
        }
        Ok(())
    }

    fn draw_boxplots<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let y_range = padded_range(
            self.boxes
                .iter()
                .filter_map(|(_, stats)| stats.as_ref())
                .flat_map(BoxStats::extent),
        );
        let n = self.boxes.len();
        let mut chart = ChartBuilder::on(area)
            .caption("Distribución de Variables", style.bold(15.0))
            .margin(style.px(10))
            .x_label_area_size(style.px(40))
            .y_label_area_size(style.px(60))
            .build_cartesian_2d(-0.5..n as f64 - 0.5, y_range)?;

        let boxes = &self.boxes;
        let x_format = |x: &f64| {
            index_at(*x, boxes.len())
                .map(|i| boxes[i].0.label().to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .light_line_style(style.grid_color())
            .disable_x_mesh()
            .x_labels(n * 2 + 1)
            .x_label_formatter(&x_format)
            .y_desc("Valor")
            .label_style(style.font(10.0))
            .draw()?;

        for (i, (variable, stats)) in self.boxes.iter().enumerate() {
            let Some(stats) = stats else { continue };
            let x = i as f64;
            let half = BOX_WIDTH / 2.0;
            let color = style.variable_color(*variable);
            let whisker = BLACK.stroke_width(style.line(1));

            chart.draw_series([
                PathElement::new(vec![(x, stats.whisker_low), (x, stats.q1)], whisker),
                PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], whisker),
                PathElement::new(
                    vec![(x - half / 2.0, stats.whisker_low), (x + half / 2.0, stats.whisker_low)],
                    whisker,
                ),
                PathElement::new(
                    vec![(x - half / 2.0, stats.whisker_high), (x + half / 2.0, stats.whisker_high)],
                    whisker,
                ),
            ])?;
            chart.draw_series([
                Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], color.mix(0.7).filled()),
                Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], whisker),
            ])?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x - half, stats.median), (x + half, stats.median)],
                BLACK.stroke_width(style.line(2)),
            )))?;
            chart.draw_series(
                stats
                    .fliers
                    .iter()
                    .map(|v| Circle::new((x, *v), style.line(3), RGBColor(128, 128, 128).filled())),
            )?;
        }
        Ok(())
    }
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &ChartStyle,
    counts: &[(String, u64)],
) -> Result<(), ChartError> {
    let n = counts.len().max(1);
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    let mut chart = ChartBuilder::on(area)
        .caption("Distribución de Condiciones Climáticas", style.bold(15.0))
        .margin(style.px(10))
        .x_label_area_size(style.px(70))
        .y_label_area_size(style.px(60))
        .build_cartesian_2d(-0.5..n as f64 - 0.5, 0.0..(max * 1.1).max(1.0))?;

    let x_format = |x: &f64| {
        index_at(*x, counts.len())
            .map(|i| counts[i].0.clone())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .light_line_style(style.grid_color())
        .disable_x_mesh()
        .x_labels(n * 2 + 1)
        .x_label_formatter(&x_format)
        .y_desc("Frecuencia")
        .label_style(style.font(10.0))
        .draw()?;

    let half = BAR_WIDTH / 2.0;
    chart.draw_series(counts.iter().enumerate().map(|(i, (name, count))| {
        let x = i as f64;
        Rectangle::new(
            [(x - half, 0.0), (x + half, *count as f64)],
            style.category_color(name).mix(0.7).filled(),
        )
    }))?;

    let label = TextStyle::from(style.font(10.0)).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
        Text::new(count.to_string(), (i as f64, *count as f64), label.clone())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_box_stats_match_linear_percentiles() {
        let stats = BoxStats::from_values(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!((stats.q1, stats.median, stats.q3), (2.0, 3.0, 4.0));
        assert_eq!((stats.whisker_low, stats.whisker_high), (1.0, 5.0));
        assert!(stats.fliers.is_empty());
    }

    #[test]
    fn test_box_stats_fliers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0, f64::NAN]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.whisker_high, 4.0);
        assert_eq!(stats.fliers, vec![100.0]);
        assert!(BoxStats::from_values(&[f64::NAN]).is_none());
    }

    fn readings(with_category: bool) -> DataFrame {
        let frame = df!(
            "datetime" => ["2024-01-01 00:00", "2024-01-01 01:00", "2024-01-01 02:00"],
            "temperature" => [10.0, 11.0, 12.0],
            "relative_humidity" => [Some(80.0), None, Some(82.0)],
            "precipitation_mm" => [0.0, 0.5, 0.0],
            "cloud_cover_octas" => [1.0, 2.0, 3.0],
            "wind_speed_kmh" => [3.0, 4.0, 5.0],
            "solar_radiation" => [0.0, 0.0, 10.0],
            "category" => ["Frío", "Templado", "Frío"]
        )
        .unwrap();
        if with_category {
            frame
        } else {
            frame.drop("category").unwrap()
        }
    }

    #[test]
    fn test_distribution_counts_and_boxes() {
        let frame = readings(true);
        let table = ReadingTable::from_frame(&frame).unwrap();
        let chart = DistributionChart::from_readings(&frame, &table).unwrap();

        assert_eq!(
            chart.categories().unwrap(),
            &[("Frío".to_string(), 2), ("Templado".to_string(), 1)]
        );
        let humidity = chart.box_stats(Variable::RelativeHumidity).unwrap();
        assert_eq!(humidity.median, 81.0);
    }

    #[test]
    fn test_histogram_absent_without_category_column() {
        let frame = readings(false);
        let table = ReadingTable::from_frame(&frame).unwrap();
        let chart = DistributionChart::from_readings(&frame, &table).unwrap();
        assert!(chart.categories().is_none());
        assert!(chart.box_stats(Variable::Temperature).is_some());
    }
}
