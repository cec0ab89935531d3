use crate::charts::axes::index_at;
use crate::charts::error::ChartError;
use crate::charts::style::{confidence_color, ChartStyle};
use crate::icons::icon::Icon;
use crate::icons::loader::IconSource;
use crate::icons::resolver::resolve_icon;
use crate::types::day_period::DayPeriod;
use crate::types::forecast_point::ForecastPoint;
use chrono::{NaiveDate, NaiveDateTime};
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::{BTreeMap, BTreeSet};

const CELL_WIDTH: f64 = 0.8;
const CELL_HEIGHT: f64 = 0.6;
const ICON_FRACTION: f64 = 0.8;
/// Gap between a cell edge and its label, at the base DPI.
const LABEL_INSET: u32 = 2;
const COLORBAR_STEPS: usize = 50;

/// One populated (date, period) cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub period: DayPeriod,
    /// Mean confidence of the cell's forecast rows.
    pub confidence: f64,
    /// Category of the first row.
    pub category: String,
    /// Timestamp of the first row.
    pub first_timestamp: NaiveDateTime,
    pub icon: Option<Icon>,
}

/// Date × period matrix of confidence-coloured cells with weather icons.
///
/// Only (date, period) pairs that have at least one forecast row get a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodGridChart {
    dates: Vec<NaiveDate>,
    cells: Vec<GridCell>,
}

impl PeriodGridChart {
    /// Groups `forecasts` by date and period and resolves one icon per cell.
    ///
    /// Icons are resolved from the category alone, without the time of day, so the
    /// grid always shows the daytime variant.
    pub fn from_forecasts(
        forecasts: &[ForecastPoint],
        icons: &impl IconSource,
    ) -> Result<Self, ChartError> {
        if forecasts.is_empty() {
            return Err(ChartError::NoData("period grid"));
        }
        let dates: Vec<NaiveDate> = forecasts
            .iter()
            .map(ForecastPoint::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut groups: BTreeMap<(NaiveDate, DayPeriod), Vec<&ForecastPoint>> = BTreeMap::new();
        for forecast in forecasts {
            groups
                .entry((forecast.date(), forecast.period()))
                .or_default()
                .push(forecast);
        }

        let cells = groups
            .into_iter()
            .filter_map(|((date, period), rows)| {
                let first = rows.first()?;
                let confidence =
                    rows.iter().map(|r| r.confidence).sum::<f64>() / rows.len() as f64;
                Some(GridCell {
                    date,
                    period,
                    confidence,
                    category: first.category.clone(),
                    first_timestamp: first.timestamp,
                    icon: resolve_icon(icons, &first.category, None::<NaiveDateTime>),
                })
            })
            .collect();

        Ok(Self { dates, cells })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, date: NaiveDate, period: DayPeriod) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|c| c.date == date && c.period == period)
    }

    fn column(&self, date: NaiveDate) -> f64 {
        self.dates.iter().position(|d| *d == date).unwrap_or(0) as f64
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let (width, _) = area.dim_in_pixel();
        let (plot_area, bar_area) = area.split_horizontally((width as f64 * 0.88) as i32);
        let columns = self.dates.len().max(1);
        let rows = DayPeriod::ALL.len();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption("Pronóstico Detallado por Períodos", style.bold(18.0))
            .margin(style.px(12))
            .x_label_area_size(style.px(50))
            .y_label_area_size(style.px(90))
            .build_cartesian_2d(-0.5..columns as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

        let dates = &self.dates;
        let x_format = |x: &f64| {
            index_at(*x, dates.len())
                .map(|i| dates[i].format("%d/%m").to_string())
                .unwrap_or_default()
        };
        let y_format = |y: &f64| {
            index_at(*y, rows)
                .map(|i| DayPeriod::ALL[i].label().to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(columns * 2 + 1)
            .y_labels(rows * 2 + 1)
            .x_label_formatter(&x_format)
            .y_label_formatter(&y_format)
            .x_desc("Fecha")
            .label_style(style.font(12.0))
            .draw()?;

        let label_size = 10.0;
        let top = TextStyle::from(style.font(label_size)).pos(Pos::new(HPos::Center, VPos::Top));
        let bottom =
            TextStyle::from(style.font(label_size)).pos(Pos::new(HPos::Center, VPos::Bottom));
        let outline = RGBColor(128, 128, 128).stroke_width(style.line(1));
        for cell in &self.cells {
            let x = self.column(cell.date);
            let y = cell.period.index() as f64;
            let fill = confidence_color(cell.confidence);
            let upper = (x - CELL_WIDTH / 2.0, y + CELL_HEIGHT / 2.0);
            let lower = (x + CELL_WIDTH / 2.0, y - CELL_HEIGHT / 2.0);

            chart.draw_series([
                Rectangle::new([upper, lower], fill.mix(0.7).filled()),
                Rectangle::new([upper, lower], outline),
            ])?;

            let (x0, y0) = chart.backend_coord(&upper);
            let (x1, y1) = chart.backend_coord(&lower);
            let layout = CellLayout::fit(
                x1 - x0,
                y1 - y0,
                style.px(label_size as u32) as i32,
                style.px(LABEL_INSET) as i32,
            );

            if let Some(icon) = &cell.icon {
                let side = layout.icon_side;
                let RGBColor(r, g, b) = fill;
                let pixels = icon.to_rgb8(side, side, (r, g, b));
                let offset = -(side as i32) / 2;
                if let Some(element) =
                    BitMapElement::with_owned_buffer((offset, offset), (side, side), pixels)
                {
                    chart.draw_series(std::iter::once(EmptyElement::at((x, y)) + element))?;
                }
            }

            chart.draw_series([
                EmptyElement::at((x, upper.1))
                    + Text::new(
                        format!("{:.0}%", cell.confidence * 100.0),
                        (0, layout.inset),
                        top.clone(),
                    ),
                EmptyElement::at((x, lower.1))
                    + Text::new(
                        cell.first_timestamp.format("%H:%M").to_string(),
                        (0, -layout.inset),
                        bottom.clone(),
                    ),
            ])?;
        }

        draw_colorbar(&bar_area, style)
    }
}

/// Pixel placement inside one cell: the percentage hangs from the top edge, the time
/// sits on the bottom edge and the icon is centred in the band between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellLayout {
    inset: i32,
    icon_side: u32,
}

impl CellLayout {
    fn fit(width: i32, height: i32, label_height: i32, inset: i32) -> Self {
        let band = height - 2 * (label_height + inset);
        let widest = (width as f64 * ICON_FRACTION) as i32;
        Self {
            inset,
            icon_side: band.min(widest).max(1) as u32,
        }
    }

    /// Pixels the two labels and the icon take from the cell's height.
    fn used_height(&self, label_height: i32) -> i32 {
        2 * (label_height + self.inset) + self.icon_side as i32
    }
}

/// Vertical legend of the confidence scale.
pub(crate) fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &ChartStyle,
) -> Result<(), ChartError> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(style.px(40))
        .margin_bottom(style.px(60))
        .margin_right(style.px(5))
        .y_label_area_size(0)
        .right_y_label_area_size(style.px(55))
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;
    bar.configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_desc("Nivel de Confianza")
        .label_style(style.font(10.0))
        .draw()?;

    let step = 1.0 / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = i as f64 * step;
        Rectangle::new(
            [(0.0, low), (1.0, low + step)],
            confidence_color(low + step / 2.0).filled(),
        )
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::icon::IconKind;
    use std::collections::HashMap;

    fn point(day: u32, hour: u32, confidence: f64, category: &str) -> ForecastPoint {
        let ts = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap();
        ForecastPoint::new(ts, 15.0, confidence, category)
    }

    fn icons() -> HashMap<IconKind, Icon> {
        IconKind::ALL
            .iter()
            .map(|k| (*k, Icon::from_rgba(*k, 1, 1, vec![0.5; 4]).unwrap()))
            .collect()
    }

    #[test]
    fn test_cells_group_by_date_and_period() {
        let forecasts = vec![
            point(2, 7, 0.9, "Templado"),
            point(2, 9, 0.5, "Llovizna"),
            point(1, 22, 0.4, "Normal"),
            point(2, 23, 0.6, "Frío"),
        ];
        let grid = PeriodGridChart::from_forecasts(&forecasts, &icons()).unwrap();

        assert_eq!(
            grid.dates(),
            &[
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
            ]
        );
        assert_eq!(grid.cells().len(), 3);

        let morning = grid
            .cell(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), DayPeriod::Manana)
            .unwrap();
        assert!((morning.confidence - 0.7).abs() < 1e-9);
        assert_eq!(morning.category, "Templado");
        assert_eq!(morning.first_timestamp.format("%H:%M").to_string(), "07:30");
        assert!(grid
            .cell(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), DayPeriod::Tarde)
            .is_none());
    }

    #[test]
    fn test_grid_icons_ignore_time_of_day() {
        let forecasts = vec![point(1, 22, 0.4, "Normal"), point(1, 1, 0.8, "Frío")];
        let grid = PeriodGridChart::from_forecasts(&forecasts, &icons()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let night = grid.cell(date, DayPeriod::Noche).unwrap();
        assert_eq!(night.icon.as_ref().map(Icon::kind), Some(IconKind::Sunny));
        let early = grid.cell(date, DayPeriod::Madrugada).unwrap();
        assert_eq!(early.icon.as_ref().map(Icon::kind), Some(IconKind::Cold));
    }

    #[test]
    fn test_cell_labels_and_icon_fit_inside_the_cell() {
        // 12 in wide grid at 300 dpi with three dates, six period rows.
        let style = ChartStyle::default().scaled(3.0);
        let label = style.px(10) as i32;
        let layout = CellLayout::fit(700, 330, label, style.px(LABEL_INSET) as i32);
        assert_eq!(layout.inset, 6);
        assert!(layout.used_height(label) <= 330);
        assert_eq!(layout.icon_side, 330 - 2 * (30 + 6));

        let wide_row = CellLayout::fit(40, 330, label, 6);
        assert_eq!(wide_row.icon_side, 32);
    }

    #[test]
    fn test_cramped_cell_keeps_a_visible_icon() {
        let layout = CellLayout::fit(30, 20, 10, 2);
        assert_eq!(layout.icon_side, 1);
    }

    #[test]
    fn test_missing_icons_leave_cells() {
        let forecasts = vec![point(1, 12, 0.8, "Nublado")];
        let grid = PeriodGridChart::from_forecasts(&forecasts, &HashMap::<IconKind, Icon>::new()).unwrap();
        assert_eq!(grid.cells().len(), 1);
        assert!(grid.cells()[0].icon.is_none());
    }
}
