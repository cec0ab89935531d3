//! Icon identities and decoded icon pixel data.

use crate::icons::error::IconError;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba32FImage};
use std::fmt;

/// The fixed set of icon files the resolver can ask for.
///
/// File names are part of the asset contract of the icon directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconKind {
    Cold,
    NightCold,
    HeavyRain,
    NightRain,
    Drizzle,
    NightDrizzle,
    Cloudy,
    PartlySunny,
    NightPartlyCloudy,
    Sunny,
    ClearNight,
}

impl IconKind {
    pub const ALL: [IconKind; 11] = [
        IconKind::Cold,
        IconKind::NightCold,
        IconKind::HeavyRain,
        IconKind::NightRain,
        IconKind::Drizzle,
        IconKind::NightDrizzle,
        IconKind::Cloudy,
        IconKind::PartlySunny,
        IconKind::NightPartlyCloudy,
        IconKind::Sunny,
        IconKind::ClearNight,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            IconKind::Cold => "Frio.png",
            IconKind::NightCold => "Noche_Frio.png",
            IconKind::HeavyRain => "Fuerte_Lluvia.png",
            IconKind::NightRain => "Noche_Lluvia.png",
            IconKind::Drizzle => "Llovizna.png",
            IconKind::NightDrizzle => "Noche_Llovizna.png",
            IconKind::Cloudy => "Nublado.png",
            IconKind::PartlySunny => "Parcialmente_Soleado.png",
            IconKind::NightPartlyCloudy => "Noche_Parcialmente_Nublado.png",
            IconKind::Sunny => "Soleado.png",
            IconKind::ClearNight => "Noche_Despejada.png",
        }
    }

    pub fn is_cold(self) -> bool {
        matches!(self, IconKind::Cold | IconKind::NightCold)
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A decoded icon: RGBA pixels normalised to `[0, 1]`, row-major.
#[derive(Clone, PartialEq)]
pub struct Icon {
    kind: IconKind,
    width: u32,
    height: u32,
    pixels: Vec<f32>,
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Icon {
    /// Wraps a decoded image. 8- and 16-bit channels are scaled to `[0, 1]`;
    /// float images are clamped into that range. Grey images gain RGB channels.
    pub fn from_image(kind: IconKind, image: DynamicImage) -> Self {
        let rgba = image.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .into_raw()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0))
            .collect();
        Self {
            kind,
            width,
            height,
            pixels,
        }
    }

    /// Builds an icon from normalised RGBA values.
    pub fn from_rgba(
        kind: IconKind,
        width: u32,
        height: u32,
        pixels: Vec<f32>,
    ) -> Result<Self, IconError> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return Err(IconError::BufferSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            kind,
            width,
            height,
            pixels: pixels.into_iter().map(|v| v.clamp(0.0, 1.0)).collect(),
        })
    }

    pub fn kind(&self) -> IconKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Normalised RGBA values, four per pixel.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Resizes to `width`×`height` (Lanczos) and flattens alpha onto `background`,
    /// returning packed 8-bit RGB, the layout bitmap backends and GUI toolkits expect.
    pub fn to_rgb8(&self, width: u32, height: u32, background: (u8, u8, u8)) -> Vec<u8> {
        let Some(buffer) = Rgba32FImage::from_raw(self.width, self.height, self.pixels.clone())
        else {
            return Vec::new();
        };
        let resized = DynamicImage::ImageRgba32F(buffer)
            .resize_exact(width.max(1), height.max(1), FilterType::Lanczos3)
            .to_rgba32f();

        let bg = [background.0, background.1, background.2].map(|c| c as f32 / 255.0);
        resized
            .pixels()
            .flat_map(|p| {
                let alpha = p.0[3].clamp(0.0, 1.0);
                (0..3).map(move |c| {
                    let v = p.0[c].clamp(0.0, 1.0) * alpha + bg[c] * (1.0 - alpha);
                    (v * 255.0).round() as u8
                })
            })
            .collect()
    }
}
