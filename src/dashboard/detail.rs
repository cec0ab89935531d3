//! Builds the detail dashboard: a date × period grid of forecast cells, each with a
//! selector the user can use to correct the predicted category.

use crate::dashboard::cell::{
    CellGlyph, CellIcon, CellKey, CellState, CellView, ConfidenceTier, MISSING_DATA_CONFIDENCE,
};
use crate::dashboard::error::DashboardError;
use crate::dashboard::feedback::{CorrectionEvent, FeedbackSink, FlashSequence};
use crate::dashboard::host::{
    DashboardHeader, DashboardHost, SelectionHandler, Sidebar, NO_DATA_MESSAGE,
    VISIBILITY_CHECK_DELAY,
};
use crate::dashboard::perception::perception_for;
use crate::icons::loader::IconSource;
use crate::icons::resolver::resolve_icon;
use crate::types::color::HexColor;
use crate::types::day_period::DayPeriod;
use crate::types::forecast_point::ForecastPoint;
use chrono::{Days, NaiveDate};
use log::{debug, info};
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Most days the grid shows.
pub const MAX_DAYS: usize = 3;

/// Size icons are scaled to inside a cell.
pub const DEFAULT_ICON_SIZE: (u32, u32) = (60, 45);

/// Days shown in the grid: the earliest forecast date and the days after it, one per
/// distinct forecast date, at most [`MAX_DAYS`].
///
/// Dates in between that have no forecasts still get a column (filled from the period
/// fallbacks), so a gap in the input shifts later dates out of the grid.
pub fn dashboard_dates(forecasts: &[ForecastPoint]) -> Vec<NaiveDate> {
    let distinct: BTreeSet<NaiveDate> = forecasts.iter().map(ForecastPoint::date).collect();
    let Some(first) = distinct.first().copied() else {
        return Vec::new();
    };
    (0..distinct.len().min(MAX_DAYS))
        .filter_map(|offset| first.checked_add_days(Days::new(offset as u64)))
        .collect()
}

/// The laid-out dashboard, ready to be handed to a [`DashboardHost`].
///
/// Cells own their resized icon data.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailDashboard {
    dates: Vec<NaiveDate>,
    header: DashboardHeader,
    sidebar: Sidebar,
    cells: Vec<CellView>,
}

impl DetailDashboard {
    /// Lays out the grid for `forecasts`.
    ///
    /// # Arguments
    ///
    /// * `forecasts` - Forecast records in model output order. The first record of a
    ///   cell decides its category and timestamp.
    /// * `icons` - Where cell icons are loaded from.
    /// * `icon_size` - Pixel size icons are resized to.
    /// * `generated_on` - Date shown in the header subtitle.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidConfidence`] if a record's confidence is not a
    /// number in `[0, 1]`.
    pub fn new(
        forecasts: &[ForecastPoint],
        icons: &impl IconSource,
        icon_size: (u32, u32),
        generated_on: NaiveDate,
    ) -> Result<Self, DashboardError> {
        if let Some(bad) = forecasts
            .iter()
            .find(|f| !(0.0..=1.0).contains(&f.confidence))
        {
            return Err(DashboardError::InvalidConfidence {
                timestamp: bad.timestamp,
                confidence: bad.confidence,
            });
        }

        let dates = dashboard_dates(forecasts);
        let mut rows: BTreeMap<CellKey, Vec<&ForecastPoint>> = BTreeMap::new();
        for forecast in forecasts {
            rows.entry(CellKey::new(forecast.date(), forecast.period()))
                .or_default()
                .push(forecast);
        }

        let cells = dates
            .iter()
            .flat_map(|date| DayPeriod::ALL.map(|period| CellKey::new(*date, period)))
            .map(|key| {
                let cell_rows = rows.get(&key).map(Vec::as_slice).unwrap_or_default();
                build_cell(key, cell_rows, icons, icon_size)
            })
            .collect();

        Ok(Self {
            header: DashboardHeader::new(&dates, generated_on),
            sidebar: Sidebar::default(),
            dates,
            cells,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn header(&self) -> &DashboardHeader {
        &self.header
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Cells in column-major order: every period of the first date, then the next date.
    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn cell(&self, date: NaiveDate, period: DayPeriod) -> Option<&CellView> {
        let key = CellKey::new(date, period);
        self.cells.iter().find(|cell| cell.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Clears `host` and draws the dashboard into it, wiring every cell's selector to
    /// `sink`.
    ///
    /// An empty dashboard only shows [`NO_DATA_MESSAGE`]. Widgets added before a host
    /// error stay in place.
    pub fn populate(
        self,
        host: &mut impl DashboardHost,
        sink: Rc<dyn FeedbackSink>,
    ) -> Result<DashboardSession, DashboardError> {
        host.clear()?;
        if self.is_empty() {
            info!("No forecasts to show in the detail dashboard");
            host.show_message(NO_DATA_MESSAGE)?;
            return Ok(DashboardSession {
                dashboard: self,
                entries: BTreeMap::new(),
            });
        }

        host.show_header(&self.header)?;
        host.show_sidebar(&self.sidebar)?;

        let mut entries = BTreeMap::new();
        for cell in &self.cells {
            let state = Rc::new(RefCell::new(CellState::new(cell.category.as_str())));
            let handler =
                selection_handler(cell.key, cell.background(), Rc::clone(&state), Rc::clone(&sink));
            host.add_cell(cell, handler)?;
            entries.insert(cell.key, state);
        }
        host.schedule_visibility_check(VISIBILITY_CHECK_DELAY);
        debug!(
            "Detail dashboard built with {} cells over {} days",
            self.cells.len(),
            self.dates.len()
        );

        Ok(DashboardSession {
            dashboard: self,
            entries,
        })
    }
}

/// A populated dashboard and the correction state of its cells. Dropping it releases
/// the state the hosted selectors do not hold themselves.
#[derive(Debug)]
pub struct DashboardSession {
    dashboard: DetailDashboard,
    entries: BTreeMap<CellKey, Rc<RefCell<CellState>>>,
}

impl DashboardSession {
    pub fn dashboard(&self) -> &DetailDashboard {
        &self.dashboard
    }

    pub fn entry(&self, date: NaiveDate, period: DayPeriod) -> Option<Ref<'_, CellState>> {
        self.entries
            .get(&CellKey::new(date, period))
            .map(|state| state.borrow())
    }

    /// Cells whose selection no longer matches the predicted category.
    pub fn corrections(&self) -> Vec<(CellKey, String)> {
        self.entries
            .iter()
            .filter_map(|(key, state)| {
                let state = state.borrow();
                state
                    .is_corrected()
                    .then(|| (*key, state.technical().to_string()))
            })
            .collect()
    }
}

fn build_cell(
    key: CellKey,
    rows: &[&ForecastPoint],
    icons: &impl IconSource,
    icon_size: (u32, u32),
) -> CellView {
    let period = key.period;
    let (timestamp, confidence, temperature, category) = match rows.first() {
        Some(first) => {
            let n = rows.len() as f64;
            let confidence = rows.iter().map(|f| f.confidence).sum::<f64>() / n;
            let mean_temperature = rows.iter().map(|f| f.predicted_temperature).sum::<f64>() / n;
            (
                first.timestamp,
                confidence,
                period.clamp_temperature(mean_temperature),
                first.category.clone(),
            )
        }
        None => (
            key.date.and_time(period.representative_time()),
            MISSING_DATA_CONFIDENCE,
            period.fallback_temperature(),
            period.fallback_category().to_string(),
        ),
    };

    let tier = ConfidenceTier::of(confidence);
    let glyph = match resolve_icon(icons, &category, timestamp) {
        Some(icon) => CellGlyph::Icon(CellIcon::from_icon(&icon, icon_size, tier.background())),
        None => CellGlyph::fallback_text(&category),
    };

    CellView {
        key,
        timestamp,
        confidence,
        temperature,
        perception: perception_for(&category).to_string(),
        category,
        tier,
        glyph,
        has_data: !rows.is_empty(),
    }
}

fn selection_handler(
    key: CellKey,
    background: HexColor,
    state: Rc<RefCell<CellState>>,
    sink: Rc<dyn FeedbackSink>,
) -> SelectionHandler {
    Box::new(move |perception: &str| {
        let technical = state.borrow_mut().select(perception).to_string();
        debug!("Cell {} corrected to '{}'", key, technical);
        let event = CorrectionEvent::new(key.date, key.period, technical);
        sink.on_feedback_changed(&event, key.as_tuple());
        FlashSequence::confirmation(background)
    })
}
