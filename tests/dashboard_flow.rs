use chrono::{NaiveDate, NaiveDateTime};
use image::{Rgb, RgbImage};
use microclima::{
    CellGlyph, CellView, CorrectionEvent, DashboardError, DashboardHeader, DashboardHost, DayPeriod,
    FeedbackSink, FlashSequence, ForecastPoint, IconKind, SelectionHandler, Sidebar, Visualizer,
    VisualizerConfig, NO_DATA_MESSAGE, SELECTOR_OPTIONS, VISIBILITY_CHECK_DELAY,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Message(String),
    Header(DashboardHeader),
    Sidebar,
    Cell(CellView),
    Error(String),
    VisibilityCheck(Duration),
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    handlers: Vec<SelectionHandler>,
    fail_after_cells: Option<usize>,
}

impl RecordingHost {
    fn cells(&self) -> Vec<&CellView> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Cell(cell) => Some(cell),
                _ => None,
            })
            .collect()
    }

    fn select(&mut self, index: usize, label: &str) -> FlashSequence {
        let handler = &mut self.handlers[index];
        handler(label)
    }
}

impl DashboardHost for RecordingHost {
    fn clear(&mut self) -> Result<(), DashboardError> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn show_message(&mut self, text: &str) -> Result<(), DashboardError> {
        self.calls.push(Call::Message(text.to_string()));
        Ok(())
    }

    fn show_header(&mut self, header: &DashboardHeader) -> Result<(), DashboardError> {
        self.calls.push(Call::Header(header.clone()));
        Ok(())
    }

    fn show_sidebar(&mut self, _sidebar: &Sidebar) -> Result<(), DashboardError> {
        self.calls.push(Call::Sidebar);
        Ok(())
    }

    fn add_cell(&mut self, cell: &CellView, on_select: SelectionHandler) -> Result<(), DashboardError> {
        if self.fail_after_cells == Some(self.handlers.len()) {
            return Err(DashboardError::host("add cell", "widget limit reached"));
        }
        self.calls.push(Call::Cell(cell.clone()));
        self.handlers.push(on_select);
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_string()));
    }

    fn schedule_visibility_check(&mut self, delay: Duration) {
        self.calls.push(Call::VisibilityCheck(delay));
    }
}

#[derive(Default)]
struct RecordingSink {
    events: RefCell<Vec<(String, NaiveDate, DayPeriod)>>,
}

impl FeedbackSink for RecordingSink {
    fn on_feedback_changed(&self, event: &CorrectionEvent, key: (NaiveDate, DayPeriod)) {
        assert_eq!((event.date(), event.period()), key);
        self.events
            .borrow_mut()
            .push((event.get().to_string(), key.0, key.1));
    }
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
}

fn write_icons(dir: &Path, kinds: &[IconKind]) {
    for kind in kinds {
        RgbImage::from_pixel(8, 6, Rgb([30, 60, 90]))
            .save(dir.join(kind.file_name()))
            .unwrap();
    }
}

fn visualizer(icon_dir: &Path) -> Visualizer {
    Visualizer::with_config(VisualizerConfig::builder().icon_dir(icon_dir).build())
}

fn forecasts() -> Vec<ForecastPoint> {
    vec![
        ForecastPoint::new(at(1, 2), 12.0, 0.9, "Frío"),
        ForecastPoint::new(at(1, 14), 25.0, 0.8, "Cálido"),
        ForecastPoint::new(at(1, 16), 21.0, 0.6, "Templado"),
        ForecastPoint::new(at(2, 9), 16.0, 0.3, "Lluvia Fuerte"),
        ForecastPoint::new(at(3, 20), 14.0, 0.75, "Templado + Muy Nublado"),
    ]
}

#[test]
fn test_dashboard_is_laid_out_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_icons(dir.path(), &[IconKind::NightCold, IconKind::Sunny, IconKind::Cloudy]);
    let mut host = RecordingHost::default();
    let sink: Rc<dyn FeedbackSink> = Rc::new(RecordingSink::default());

    let session = visualizer(dir.path())
        .show_detail_dashboard()
        .host(&mut host)
        .forecasts(&forecasts())
        .sink(sink)
        .generated_on(date(1))
        .call()
        .expect("dashboard should build");

    assert_eq!(host.calls[0], Call::Clear);
    let Call::Header(header) = &host.calls[1] else {
        panic!("expected header, got {:?}", host.calls[1]);
    };
    assert_eq!(header.subtitle, "Generado el 1 de julio de 2024");
    assert_eq!(header.columns.len(), 3);
    assert_eq!(header.columns[0].weekday, "Lunes");
    assert_eq!(host.calls[2], Call::Sidebar);
    assert_eq!(host.cells().len(), 12);
    assert_eq!(
        host.calls.last(),
        Some(&Call::VisibilityCheck(VISIBILITY_CHECK_DELAY))
    );
    assert_eq!(session.dashboard().dates(), &[date(1), date(2), date(3)]);

    let cells = host.cells();
    let cold = cells[0];
    assert_eq!(cold.key.period, DayPeriod::Madrugada);
    assert!(matches!(&cold.glyph, CellGlyph::Icon(icon) if icon.width == 60 && icon.height == 45));

    let afternoon = cells[2];
    assert_eq!(afternoon.category, "Cálido");
    assert_eq!(afternoon.temperature, 18.5);
    assert!((afternoon.confidence - 0.7).abs() < 1e-9);
    assert_eq!(afternoon.confidence_label(), "70%");

    // Heavy rain by day needs Fuerte_Lluvia.png or Llovizna.png, neither exists.
    let rain = cells[5];
    assert_eq!(rain.perception, "Lluvia");
    assert!(SELECTOR_OPTIONS.contains(&rain.perception.as_str()));
    assert_eq!(rain.glyph, CellGlyph::Text("Llu".into()));

    let night = cells[11];
    assert!(night.has_data);
    assert_eq!(night.perception, "Nublado");
    assert!(matches!(night.glyph, CellGlyph::Icon(_)));
}

#[test]
fn test_selection_reaches_the_sink() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = RecordingHost::default();
    let sink = Rc::new(RecordingSink::default());

    let session = visualizer(dir.path())
        .show_detail_dashboard()
        .host(&mut host)
        .forecasts(&forecasts())
        .sink(sink.clone())
        .generated_on(date(1))
        .call()
        .unwrap();

    let background = host.cells()[5].background();
    let flash = host.select(5, "Nublado");
    assert_eq!(flash, FlashSequence::confirmation(background));
    host.select(0, "Granizo");

    assert_eq!(
        *sink.events.borrow(),
        vec![
            ("Templado + Muy Nublado".to_string(), date(2), DayPeriod::Manana),
            ("Granizo".to_string(), date(1), DayPeriod::Madrugada),
        ]
    );

    let entry = session.entry(date(2), DayPeriod::Manana).unwrap();
    assert_eq!(entry.selected(), "Nublado");
    assert_eq!(entry.original_category(), "Lluvia Fuerte");
    drop(entry);
    assert_eq!(session.corrections().len(), 2);
}

#[test]
fn test_empty_forecasts_show_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = RecordingHost::default();
    let session = visualizer(dir.path())
        .show_detail_dashboard()
        .host(&mut host)
        .forecasts(&[])
        .sink(Rc::new(RecordingSink::default()))
        .call()
        .unwrap();

    assert_eq!(
        host.calls,
        vec![Call::Clear, Call::Message(NO_DATA_MESSAGE.to_string())]
    );
    assert!(session.dashboard().is_empty());
}

#[test]
fn test_host_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = RecordingHost {
        fail_after_cells: Some(2),
        ..RecordingHost::default()
    };
    let session = visualizer(dir.path())
        .show_detail_dashboard()
        .host(&mut host)
        .forecasts(&forecasts())
        .sink(Rc::new(RecordingSink::default()))
        .call();

    assert!(session.is_none());
    assert_eq!(host.cells().len(), 2);
    assert_eq!(
        host.calls.last(),
        Some(&Call::Error(
            "Error al actualizar gráfica: Dashboard host failed to add cell".to_string()
        ))
    );
}
