//! The boundary to the GUI toolkit hosting the detail dashboard, and the static parts
//! of the dashboard layout (header and sidebar).

use crate::dashboard::cell::CellView;
use crate::dashboard::error::DashboardError;
use crate::dashboard::feedback::FlashSequence;
use crate::types::color::HexColor;
use crate::types::day_period::DayPeriod;
use chrono::{Datelike, NaiveDate, Weekday};
use std::time::Duration;

/// Shown instead of the grid when there are no forecasts.
pub const NO_DATA_MESSAGE: &str = "No hay datos disponibles";

/// Delay before the host should check that the freshly built grid is visible.
pub const VISIBILITY_CHECK_DELAY: Duration = Duration::from_millis(300);

/// Called with the selected label when a cell's selector changes. Returns the flash the
/// host should play on that cell.
pub type SelectionHandler = Box<dyn FnMut(&str) -> FlashSequence>;

/// A GUI container the detail dashboard is drawn into.
///
/// The dashboard describes what to show; the host owns the widgets. Methods are called
/// in this order: [`clear`](Self::clear), then either
/// [`show_message`](Self::show_message) alone or [`show_header`](Self::show_header),
/// [`show_sidebar`](Self::show_sidebar), one [`add_cell`](Self::add_cell) per cell and
/// finally [`schedule_visibility_check`](Self::schedule_visibility_check).
pub trait DashboardHost {
    fn clear(&mut self) -> Result<(), DashboardError>;

    fn show_message(&mut self, text: &str) -> Result<(), DashboardError>;

    fn show_header(&mut self, header: &DashboardHeader) -> Result<(), DashboardError>;

    fn show_sidebar(&mut self, sidebar: &Sidebar) -> Result<(), DashboardError>;

    /// Adds a cell with a selector offering [`SELECTOR_OPTIONS`], preselected on
    /// `cell.perception`. `on_select` must be invoked whenever the user picks a label.
    ///
    /// [`SELECTOR_OPTIONS`]: crate::SELECTOR_OPTIONS
    fn add_cell(&mut self, cell: &CellView, on_select: SelectionHandler) -> Result<(), DashboardError>;

    /// Error dialog. Hosts cannot fail here.
    fn show_error(&mut self, message: &str);

    fn schedule_visibility_check(&mut self, _delay: Duration) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub date: NaiveDate,
    /// `dd/mm`
    pub label: String,
    pub weekday: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub period: DayPeriod,
    pub emoji: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardHeader {
    pub title: &'static str,
    pub subtitle: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<RowLabel>,
}

impl DashboardHeader {
    pub const TITLE: &'static str = "Pronóstico Meteorológico Detallado";

    pub fn new(dates: &[NaiveDate], generated_on: NaiveDate) -> Self {
        Self {
            title: Self::TITLE,
            subtitle: format!("Generado el {}", spanish_date(generated_on)),
            columns: dates
                .iter()
                .map(|date| ColumnHeader {
                    date: *date,
                    label: date.format("%d/%m").to_string(),
                    weekday: weekday_name(date.weekday()),
                })
                .collect(),
            rows: DayPeriod::ALL
                .iter()
                .map(|period| RowLabel {
                    period: *period,
                    emoji: period.emoji(),
                    label: period.label(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub background: HexColor,
    pub foreground: HexColor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLegendEntry {
    pub name: &'static str,
    pub color: HexColor,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLine {
    pub text: &'static str,
    pub background: HexColor,
}

/// Legends and usage hints shown next to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub confidence_legend: Vec<LegendEntry>,
    pub categories: Vec<CategoryLegendEntry>,
    pub help_title: &'static str,
    pub help: Vec<HelpLine>,
}

impl Default for Sidebar {
    fn default() -> Self {
        let legend = |label, background, foreground| LegendEntry {
            label,
            background,
            foreground,
        };
        let category = |name, color, emoji| CategoryLegendEntry { name, color, emoji };
        let help = |text, background| HelpLine { text, background };
        Self {
            confidence_legend: vec![
                legend("100%", HexColor(0xe6, 0xff, 0xe6), HexColor(0x00, 0x66, 0x00)),
                legend("50%", HexColor(0xff, 0xfd, 0xe6), HexColor(0xcc, 0x66, 0x00)),
                legend("0%", HexColor(0xff, 0xe6, 0xe6), HexColor(0xcc, 0x00, 0x00)),
            ],
            categories: vec![
                category("Soleado", HexColor(0xf9, 0xc7, 0x4f), "☀️"),
                category("Templado", HexColor(0x90, 0xbe, 0x6d), "🌥️"),
                category("Cálido", HexColor(0xf9, 0x41, 0x44), "🔥"),
                category("Frío", HexColor(0x00, 0xb4, 0xd8), "❄️"),
                category("Nublado", HexColor(0x75, 0x8e, 0x4f), "☁️"),
                category("Llovizna", HexColor(0x43, 0xaa, 0x8b), "🌦️"),
            ],
            help_title: "Cómo usar este panel",
            help: vec![
                help("🌈 Los colores indican el nivel de confianza", HexColor(0xf0, 0xf0, 0xff)),
                help("🔍 Seleccione para corregir la categoría", HexColor(0xf0, 0xff, 0xf0)),
                help("📊 Sus correcciones mejoran el modelo", HexColor(0xff, 0xf0, 0xf0)),
            ],
        }
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        _ => "diciembre",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// `"5 de marzo de 2024"`
pub fn spanish_date(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), month_name(date.month()), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_labels() {
        let dates = [
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        ];
        let header = DashboardHeader::new(&dates, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(header.subtitle, "Generado el 1 de marzo de 2024");
        assert_eq!(header.columns[0].label, "04/03");
        assert_eq!(header.columns[0].weekday, "Lunes");
        assert_eq!(header.columns[1].weekday, "Martes");
        assert_eq!(header.rows.len(), 4);
        assert_eq!(header.rows[1].label, "Mañana");
    }

    #[test]
    fn test_sidebar_contents() {
        let sidebar = Sidebar::default();
        assert_eq!(sidebar.confidence_legend.len(), 3);
        assert_eq!(sidebar.categories[3].name, "Frío");
        assert_eq!(sidebar.categories[3].color.to_string(), "#00B4D8");
        assert_eq!(sidebar.help.len(), 3);
    }

    #[test]
    fn test_spanish_dates() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(spanish_date(date), "31 de diciembre de 2023");
        assert_eq!(weekday_name(date.weekday()), "Domingo");
    }
}
