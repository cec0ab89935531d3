//! The correction channel back to the forecasting model, and the confirmation flash a
//! cell plays after a correction.

use crate::types::color::HexColor;
use crate::types::day_period::DayPeriod;
use chrono::NaiveDate;
use std::time::Duration;

/// A user correction of one cell's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEvent {
    date: NaiveDate,
    period: DayPeriod,
    category: String,
}

impl CorrectionEvent {
    pub fn new(date: NaiveDate, period: DayPeriod, category: impl Into<String>) -> Self {
        Self {
            date,
            period,
            category: category.into(),
        }
    }

    /// The corrected technical category.
    pub fn get(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn period(&self) -> DayPeriod {
        self.period
    }
}

/// Receives corrections made in the detail dashboard.
///
/// Implementations needing to record state use interior mutability; the dashboard
/// shares one sink between all of its cells.
pub trait FeedbackSink {
    fn on_feedback_changed(&self, event: &CorrectionEvent, key: (NaiveDate, DayPeriod));
}

impl<F> FeedbackSink for F
where
    F: Fn(&CorrectionEvent, (NaiveDate, DayPeriod)),
{
    fn on_feedback_changed(&self, event: &CorrectionEvent, key: (NaiveDate, DayPeriod)) {
        self(event, key)
    }
}

/// One background change of a flash, applied `delay` after the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashStep {
    pub delay: Duration,
    pub background: HexColor,
}

/// Background changes a host plays on a cell to confirm a correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSequence {
    steps: Vec<FlashStep>,
}

impl FlashSequence {
    pub const FLASH: HexColor = HexColor::new(0xd0, 0xf0, 0xc0);
    pub const FADE: HexColor = HexColor::new(0xe0, 0xff, 0xe0);
    pub const STEP_DELAY: Duration = Duration::from_millis(150);

    /// Green flash, lighter green, then back to `original`.
    pub fn confirmation(original: HexColor) -> Self {
        Self {
            steps: vec![
                FlashStep {
                    delay: Duration::ZERO,
                    background: Self::FLASH,
                },
                FlashStep {
                    delay: Self::STEP_DELAY,
                    background: Self::FADE,
                },
                FlashStep {
                    delay: Self::STEP_DELAY,
                    background: original,
                },
            ],
        }
    }

    pub fn steps(&self) -> &[FlashStep] {
        &self.steps
    }

    /// Offset of every step from the start of the sequence.
    pub fn schedule(&self) -> Vec<(Duration, HexColor)> {
        let mut elapsed = Duration::ZERO;
        self.steps
            .iter()
            .map(|step| {
                elapsed += step.delay;
                (elapsed, step.background)
            })
            .collect()
    }

    /// Background once the sequence has finished.
    pub fn final_background(&self) -> Option<HexColor> {
        self.steps.last().map(|step| step.background)
    }
}
