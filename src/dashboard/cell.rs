//! One (date, period) cell of the detail dashboard: what it displays and the
//! correction state behind its selector.

use crate::dashboard::perception::{perception_for, technical_for};
use crate::icons::icon::Icon;
use crate::types::color::HexColor;
use crate::types::day_period::DayPeriod;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Confidence shown for cells the forecast does not cover.
pub const MISSING_DATA_CONFIDENCE: f64 = 0.55;

/// Glyph drawn next to the temperature value.
pub const THERMOMETER: &str = "🌡️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub date: NaiveDate,
    pub period: DayPeriod,
}

impl CellKey {
    pub fn new(date: NaiveDate, period: DayPeriod) -> Self {
        Self { date, period }
    }

    pub fn as_tuple(self) -> (NaiveDate, DayPeriod) {
        (self.date, self.period)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%d/%m"), self.period)
    }
}

/// Three-level confidence styling of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub const HIGH_THRESHOLD: f64 = 0.7;
    pub const LOW_THRESHOLD: f64 = 0.5;

    pub fn of(confidence: f64) -> Self {
        if confidence >= Self::HIGH_THRESHOLD {
            ConfidenceTier::High
        } else if confidence < Self::LOW_THRESHOLD {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::Medium
        }
    }

    pub fn background(self) -> HexColor {
        match self {
            ConfidenceTier::High => HexColor(0xe6, 0xf7, 0xe6),
            ConfidenceTier::Medium => HexColor(0xff, 0xfd, 0xe6),
            ConfidenceTier::Low => HexColor(0xff, 0xe6, 0xe6),
        }
    }

    pub fn border(self) -> HexColor {
        match self {
            ConfidenceTier::High => HexColor(0x90, 0xbe, 0x6d),
            ConfidenceTier::Medium => HexColor(0xf9, 0xc7, 0x4f),
            ConfidenceTier::Low => HexColor(0xf9, 0x41, 0x44),
        }
    }
}

/// An icon already resized for its cell and flattened onto the cell background.
#[derive(Debug, Clone, PartialEq)]
pub struct CellIcon {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB, row-major.
    pub rgb: Vec<u8>,
}

impl CellIcon {
    pub fn from_icon(icon: &Icon, (width, height): (u32, u32), background: HexColor) -> Self {
        Self {
            width,
            height,
            rgb: icon.to_rgb8(width, height, background.rgb()),
        }
    }
}

/// What a cell shows in place of its weather icon.
#[derive(Debug, Clone, PartialEq)]
pub enum CellGlyph {
    Icon(CellIcon),
    /// Used when no icon could be resolved: the first characters of the category.
    Text(String),
}

impl CellGlyph {
    pub fn fallback_text(category: &str) -> Self {
        CellGlyph::Text(category.chars().take(3).collect())
    }
}

/// Everything a host needs to draw one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub key: CellKey,
    /// First forecast timestamp of the cell, or the period's representative time.
    pub timestamp: NaiveDateTime,
    pub confidence: f64,
    /// Mean forecast temperature clamped into the period band.
    pub temperature: f64,
    /// Technical category the model predicted.
    pub category: String,
    /// Label the selector starts on.
    pub perception: String,
    pub tier: ConfidenceTier,
    pub glyph: CellGlyph,
    /// `false` when the values come from the period fallbacks.
    pub has_data: bool,
}

impl CellView {
    pub fn background(&self) -> HexColor {
        self.tier.background()
    }

    pub fn border(&self) -> HexColor {
        self.tier.border()
    }

    pub fn confidence_label(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }
}

/// The correction entry behind one cell's selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    original_category: String,
    selected: String,
    technical: String,
}

impl CellState {
    pub fn new(original_category: impl Into<String>) -> Self {
        let original_category = original_category.into();
        Self {
            selected: perception_for(&original_category).to_string(),
            technical: original_category.clone(),
            original_category,
        }
    }

    /// Records a new selector value and returns the technical category it maps to.
    pub fn select(&mut self, perception: &str) -> &str {
        self.selected = perception.to_string();
        self.technical = technical_for(perception).to_string();
        &self.technical
    }

    pub fn original_category(&self) -> &str {
        &self.original_category
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn technical(&self) -> &str {
        &self.technical
    }

    pub fn is_corrected(&self) -> bool {
        self.technical != self.original_category
    }
}
