//! Maps a free-text weather category plus an optional timestamp to an icon.
//!
//! Categories are open-ended and may combine conditions ("Cálido + Muy Nublado"), so
//! instead of an exhaustive table the resolver walks an ordered list of rules: cold,
//! heavy rain, light rain, heavy cloud, partial cloud, clear, residual cloud, default.
//! The first rule whose predicate matches decides the icon; its candidates are tried in
//! order and, if none of them can be loaded, resolution yields `None` without
//! consulting later rules.

use crate::icons::icon::{Icon, IconKind};
use crate::icons::loader::IconSource;
use crate::types::into_timestamp::IntoTimestamp;
use chrono::{NaiveDateTime, Timelike};
use log::debug;

/// Hour at which night starts (inclusive).
pub const NIGHT_START_HOUR: u32 = 18;
/// Hour at which night ends (exclusive).
pub const NIGHT_END_HOUR: u32 = 6;

/// Identifies which rule of the cascade produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconRule {
    Cold,
    HeavyRain,
    Rain,
    VeryCloudy,
    PartlyCloudy,
    ClearNight,
    ClearDay,
    ResidualCloud,
    Default,
}

/// Night is `[18:00, 06:00)`; a missing timestamp counts as day.
pub fn is_night(timestamp: Option<NaiveDateTime>) -> bool {
    timestamp.is_some_and(|ts| ts.hour() >= NIGHT_START_HOUR || ts.hour() < NIGHT_END_HOUR)
}

/// Lowercases, trims and strips Spanish diacritics so "FRÍO", "frío" and "frio"
/// compare equal.
pub fn normalize_category(category: &str) -> String {
    category
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}

/// A normalised icon request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    normalized: String,
    night: bool,
}

impl IconRequest {
    pub fn new(category: &str, timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            normalized: normalize_category(category),
            night: is_night(timestamp),
        }
    }

    fn has(&self, needle: &str) -> bool {
        self.normalized.contains(needle)
    }

    fn is_cloudy(&self) -> bool {
        self.has("nublado")
    }
}

/// Outcome of the pure selection step: the deciding rule and the files to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSelection {
    pub rule: IconRule,
    pub candidates: &'static [IconKind],
}

struct Rule {
    rule: IconRule,
    applies: fn(&IconRequest) -> bool,
    candidates: fn(&IconRequest) -> &'static [IconKind],
}

const RULES: [Rule; 9] = [
    Rule {
        rule: IconRule::Cold,
        applies: is_cold,
        candidates: cold_icons,
    },
    Rule {
        rule: IconRule::HeavyRain,
        applies: is_heavy_rain,
        candidates: heavy_rain_icons,
    },
    Rule {
        rule: IconRule::Rain,
        applies: is_rain,
        candidates: rain_icons,
    },
    Rule {
        rule: IconRule::VeryCloudy,
        applies: is_very_cloudy,
        candidates: very_cloudy_icons,
    },
    Rule {
        rule: IconRule::PartlyCloudy,
        applies: is_partly_cloudy,
        candidates: partly_cloudy_icons,
    },
    Rule {
        rule: IconRule::ClearNight,
        applies: is_clear_night,
        candidates: clear_night_icons,
    },
    Rule {
        rule: IconRule::ClearDay,
        applies: is_clear_day,
        candidates: clear_day_icons,
    },
    Rule {
        rule: IconRule::ResidualCloud,
        applies: is_residual_cloud,
        candidates: very_cloudy_icons,
    },
    Rule {
        rule: IconRule::Default,
        applies: always,
        candidates: default_icons,
    },
];

fn is_cold(r: &IconRequest) -> bool {
    r.has("frio")
}

fn cold_icons(r: &IconRequest) -> &'static [IconKind] {
    if r.night {
        &[IconKind::NightCold, IconKind::Cold]
    } else {
        &[IconKind::Cold]
    }
}

fn is_heavy_rain(r: &IconRequest) -> bool {
    r.has("lluvia fuerte")
}

fn heavy_rain_icons(r: &IconRequest) -> &'static [IconKind] {
    if r.night {
        &[IconKind::NightRain, IconKind::NightDrizzle]
    } else {
        &[IconKind::HeavyRain, IconKind::Drizzle]
    }
}

fn is_rain(r: &IconRequest) -> bool {
    r.has("llovizna") || r.has("lluvia")
}

fn rain_icons(r: &IconRequest) -> &'static [IconKind] {
    if r.night {
        &[IconKind::NightDrizzle]
    } else {
        &[IconKind::Drizzle]
    }
}

fn is_very_cloudy(r: &IconRequest) -> bool {
    r.has("muy nublado")
}

fn very_cloudy_icons(_: &IconRequest) -> &'static [IconKind] {
    &[IconKind::Cloudy]
}

fn is_partly_cloudy(r: &IconRequest) -> bool {
    r.has("parcialmente nublado")
}

fn partly_cloudy_icons(r: &IconRequest) -> &'static [IconKind] {
    if r.night {
        &[IconKind::NightPartlyCloudy]
    } else {
        &[IconKind::PartlySunny]
    }
}

fn is_clear_night(r: &IconRequest) -> bool {
    r.night && (r.has("calido") || r.has("normal")) && !r.is_cloudy()
}

fn clear_night_icons(_: &IconRequest) -> &'static [IconKind] {
    &[IconKind::ClearNight]
}

fn is_clear_day(r: &IconRequest) -> bool {
    !r.night && (r.has("templado") || r.has("calido")) && !r.is_cloudy()
}

fn clear_day_icons(_: &IconRequest) -> &'static [IconKind] {
    &[IconKind::Sunny]
}

fn is_residual_cloud(r: &IconRequest) -> bool {
    r.is_cloudy()
}

fn always(_: &IconRequest) -> bool {
    true
}

fn default_icons(r: &IconRequest) -> &'static [IconKind] {
    if r.night {
        &[IconKind::ClearNight]
    } else {
        &[IconKind::Sunny]
    }
}

/// Runs the cascade without touching any icon source.
///
/// # Examples
///
/// ```
/// use microclima::{select_icon, IconKind, IconRule};
///
/// let selection = select_icon("Templado + Muy Nublado", None);
/// assert_eq!(selection.rule, IconRule::VeryCloudy);
/// assert_eq!(selection.candidates, &[IconKind::Cloudy]);
/// ```
pub fn select_icon(category: &str, timestamp: Option<NaiveDateTime>) -> IconSelection {
    let request = IconRequest::new(category, timestamp);
    select_for(&request)
}

fn select_for(request: &IconRequest) -> IconSelection {
    // The last rule always applies, so the fallback below is never reached in practice.
    RULES
        .iter()
        .find(|rule| (rule.applies)(request))
        .map(|rule| IconSelection {
            rule: rule.rule,
            candidates: (rule.candidates)(request),
        })
        .unwrap_or(IconSelection {
            rule: IconRule::Default,
            candidates: default_icons(request),
        })
}

/// Selects and loads the icon for `category`.
///
/// Returns `None` if the deciding rule's candidates are all unavailable in `source`.
pub fn resolve_icon(
    source: &impl IconSource,
    category: &str,
    timestamp: impl IntoTimestamp,
) -> Option<Icon> {
    let request = IconRequest::new(category, timestamp.into_timestamp());
    let selection = select_for(&request);
    debug!(
        "Icon for category '{}' (night: {}) decided by {:?}",
        category, request.night, selection.rule
    );
    let icon = selection
        .candidates
        .iter()
        .find_map(|kind| source.load(*kind));
    if icon.is_none() {
        debug!(
            "No icon available for '{}' among {:?}",
            category, selection.candidates
        );
    }
    icon
}
