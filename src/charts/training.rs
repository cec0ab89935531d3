use crate::charts::axes::padded_range;
use crate::charts::error::ChartError;
use crate::charts::style::{rgb, ChartStyle};
use crate::types::training_history::{TrainingHistory, ACCURACY, LOSS, VAL_ACCURACY, VAL_LOSS};
use plotters::coord::Shift;
use plotters::prelude::*;

/// A train/validation pair of curves over epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPanel {
    pub title: &'static str,
    pub y_desc: &'static str,
    pub train: Vec<f64>,
    pub validation: Vec<f64>,
}

/// Loss and accuracy curves side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingChart {
    loss: MetricPanel,
    accuracy: MetricPanel,
}

impl TrainingChart {
    /// # Errors
    ///
    /// Returns [`ChartError::MissingSeries`] naming the first of `loss`, `val_loss`,
    /// `accuracy`, `val_accuracy` the history lacks.
    pub fn from_history(history: &TrainingHistory) -> Result<Self, ChartError> {
        let series = |name: &str| {
            history
                .get(name)
                .map(<[f64]>::to_vec)
                .ok_or_else(|| ChartError::MissingSeries(name.to_string()))
        };
        Ok(Self {
            loss: MetricPanel {
                title: "Pérdida del Modelo",
                y_desc: "Pérdida",
                train: series(LOSS)?,
                validation: series(VAL_LOSS)?,
            },
            accuracy: MetricPanel {
                title: "Precisión del Modelo",
                y_desc: "Precisión",
                train: series(ACCURACY)?,
                validation: series(VAL_ACCURACY)?,
            },
        })
    }

    pub fn loss(&self) -> &MetricPanel {
        &self.loss
    }

    pub fn accuracy(&self) -> &MetricPanel {
        &self.accuracy
    }

    pub(crate) fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &ChartStyle,
    ) -> Result<(), ChartError> {
        let (width, _) = area.dim_in_pixel();
        let (left, right) = area.split_horizontally((width / 2) as i32);
        draw_panel(&left, style, &self.loss)?;
        draw_panel(&right, style, &self.accuracy)
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &ChartStyle,
    panel: &MetricPanel,
) -> Result<(), ChartError> {
    let epochs = panel.train.len().max(panel.validation.len()).max(2);
    let y_range = padded_range(panel.train.iter().chain(&panel.validation).copied());
    let (swatch, _) = style.swatch();
    let stroke = style.line(2);
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, style.bold(15.0))
        .margin(style.px(12))
        .x_label_area_size(style.px(40))
        .y_label_area_size(style.px(60))
        .build_cartesian_2d(0.0..(epochs - 1) as f64, y_range)?;

    chart
        .configure_mesh()
        .light_line_style(style.grid_color())
        .x_desc("Época")
        .y_desc(panel.y_desc)
        .label_style(style.font(10.0))
        .draw()?;

    for (label, values, color) in [
        ("Entrenamiento", &panel.train, rgb(style.train)),
        ("Validación", &panel.validation, rgb(style.validation)),
    ] {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                color.stroke_width(stroke),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], color.stroke_width(stroke))
            });
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_series_is_named() {
        let history = TrainingHistory::new()
            .with_series(LOSS, vec![1.0, 0.5])
            .with_series(VAL_LOSS, vec![1.1, 0.6])
            .with_series(ACCURACY, vec![0.5, 0.7]);
        match TrainingChart::from_history(&history) {
            Err(ChartError::MissingSeries(name)) => assert_eq!(name, VAL_ACCURACY),
            other => panic!("expected MissingSeries, got {other:?}"),
        }
    }

    #[test]
    fn test_panels_copy_series() {
        let history = TrainingHistory::new()
            .with_series(LOSS, vec![1.0, 0.5])
            .with_series(VAL_LOSS, vec![1.1, 0.6])
            .with_series(ACCURACY, vec![0.5, 0.7])
            .with_series(VAL_ACCURACY, vec![0.4, 0.65]);
        let chart = TrainingChart::from_history(&history).unwrap();
        assert_eq!(chart.loss().validation, vec![1.1, 0.6]);
        assert_eq!(chart.accuracy().title, "Precisión del Modelo");
    }
}
