//! Colours and fonts shared by every chart, and the red→yellow→green confidence scale.

use crate::types::color::HexColor;
use crate::types::reading::Variable;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Visual settings for the chart builders.
///
/// Every field has a default, so a configuration file only needs to name what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub font_family: String,
    pub temperature: HexColor,
    pub humidity: HexColor,
    pub precipitation: HexColor,
    pub cloud_cover: HexColor,
    pub wind_speed: HexColor,
    pub solar_radiation: HexColor,
    /// Filled area behind the temperature line.
    pub confidence: HexColor,
    pub train: HexColor,
    pub validation: HexColor,
    /// Bar colour per category in the distribution chart.
    pub category_palette: BTreeMap<String, HexColor>,
    pub unknown_category: HexColor,
    /// Opacity of the light grid lines.
    pub grid_alpha: f64,
    /// Multiplier for font sizes and pixel measures, set per render from the DPI.
    #[serde(skip, default = "unit_scale")]
    scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Default for ChartStyle {
    fn default() -> Self {
        let category_palette = [
            ("Frío", HexColor(0x00, 0xB4, 0xD8)),
            ("Templado", HexColor(0x90, 0xBE, 0x6D)),
            ("Cálido", HexColor(0xF9, 0x41, 0x44)),
            ("Muy Húmedo", HexColor(0x27, 0x7D, 0xA1)),
            ("Húmedo", HexColor(0x4D, 0x90, 0x8E)),
            ("Lluvia Fuerte", HexColor(0x57, 0x75, 0x90)),
            ("Llovizna", HexColor(0x43, 0xAA, 0x8B)),
            ("Muy Nublado", HexColor(0x75, 0x8E, 0x4F)),
            ("Parcialmente Nublado", HexColor(0xF9, 0xC7, 0x4F)),
            ("Normal", HexColor(0xF8, 0x96, 0x1E)),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color))
        .collect();

        Self {
            font_family: "sans-serif".to_string(),
            temperature: HexColor(0xFF, 0x96, 0x71),
            humidity: HexColor(0x00, 0xD4, 0xFF),
            precipitation: HexColor(0x00, 0x5E, 0xFF),
            cloud_cover: HexColor(0xA5, 0xA5, 0xA5),
            wind_speed: HexColor(0x69, 0xB3, 0x4C),
            solar_radiation: HexColor(0xFF, 0xD7, 0x00),
            confidence: HexColor(0x00, 0x80, 0x00),
            train: HexColor(0xFF, 0x96, 0x71),
            validation: HexColor(0x00, 0x5E, 0xFF),
            category_palette,
            unknown_category: HexColor(0x88, 0x88, 0x88),
            grid_alpha: 0.3,
            scale: unit_scale(),
        }
    }
}

impl ChartStyle {
    pub fn variable_color(&self, variable: Variable) -> RGBColor {
        let color = match variable {
            Variable::Temperature => self.temperature,
            Variable::RelativeHumidity => self.humidity,
            Variable::Precipitation => self.precipitation,
            Variable::CloudCover => self.cloud_cover,
            Variable::WindSpeed => self.wind_speed,
            Variable::SolarRadiation => self.solar_radiation,
        };
        rgb(color)
    }

    /// Palette colour of `category`, or the unknown-category grey.
    pub fn category_color(&self, category: &str) -> RGBColor {
        rgb(self
            .category_palette
            .get(category)
            .copied()
            .unwrap_or(self.unknown_category))
    }

    /// Copy of this style with fonts, margins, markers and strokes multiplied by
    /// `factor`. Non-positive or NaN factors fall back to 1.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = if factor.is_finite() && factor > 0.0 { factor } else { unit_scale() };
        Self {
            scale,
            ..self.clone()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// A pixel measure given at the base DPI, scaled for the current render.
    pub(crate) fn px(&self, base: u32) -> u32 {
        (base as f64 * self.scale).round() as u32
    }

    /// Like [`ChartStyle::px`] but never thinner than one pixel.
    pub(crate) fn line(&self, base: u32) -> u32 {
        self.px(base).max(1)
    }

    /// Width and half-height of a legend swatch, in pixels.
    pub(crate) fn swatch(&self) -> (i32, i32) {
        (self.px(15) as i32, self.px(5) as i32)
    }

    pub(crate) fn font(&self, size: f64) -> FontDesc<'_> {
        FontDesc::new(
            FontFamily::Name(&self.font_family),
            size * self.scale,
            FontStyle::Normal,
        )
    }

    pub(crate) fn bold(&self, size: f64) -> FontDesc<'_> {
        FontDesc::new(
            FontFamily::Name(&self.font_family),
            size * self.scale,
            FontStyle::Bold,
        )
    }

    pub(crate) fn grid_color(&self) -> RGBAColor {
        BLACK.mix(self.grid_alpha * 0.5)
    }
}

pub(crate) fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

const RD_YL_GN: [(f64, (u8, u8, u8)); 11] = [
    (0.0, (165, 0, 38)),
    (0.1, (215, 48, 39)),
    (0.2, (244, 109, 67)),
    (0.3, (253, 174, 97)),
    (0.4, (254, 224, 139)),
    (0.5, (255, 255, 191)),
    (0.6, (217, 239, 139)),
    (0.7, (166, 217, 106)),
    (0.8, (102, 189, 99)),
    (0.9, (26, 152, 80)),
    (1.0, (0, 104, 55)),
];

/// Maps a confidence in `[0, 1]` onto the red→yellow→green scale. Values outside the
/// range are clamped; NaN maps to the low end.
pub fn confidence_color(value: f64) -> RGBColor {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let upper = RD_YL_GN
        .iter()
        .position(|(stop, _)| *stop >= v)
        .unwrap_or(RD_YL_GN.len() - 1)
        .max(1);
    let (lo_stop, lo) = RD_YL_GN[upper - 1];
    let (hi_stop, hi) = RD_YL_GN[upper];
    let t = ((v - lo_stop) / (hi_stop - lo_stop)).clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(lo.0, hi.0), mix(lo.1, hi.1), mix(lo.2, hi.2))
}
