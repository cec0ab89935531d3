//! Settings of a [`Visualizer`](crate::Visualizer).

use crate::charts::figure::DEFAULT_DPI;
use crate::charts::style::ChartStyle;
use crate::dashboard::detail::DEFAULT_ICON_SIZE;
use crate::dataset::error::DataError;
use crate::dataset::read_json;
use crate::utils::ICON_DIR_NAME;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Visualizer settings.
///
/// Every field is optional in a configuration file; missing fields take their default.
///
/// # Examples
///
/// ```
/// use microclima::VisualizerConfig;
///
/// let config = VisualizerConfig::builder()
///     .icon_dir("/opt/weather/icons")
///     .report_dpi(150)
///     .build();
/// assert_eq!(config.icon_size, (60, 45));
///
/// let parsed: VisualizerConfig = serde_json::from_str(r#"{"report_dpi": 72}"#).unwrap();
/// assert_eq!(parsed.icon_dir_name, "Imagenes-Clima");
/// assert_eq!(parsed.report_dpi, 72);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Explicit icon directory. When unset, `icon_dir_name` is looked up next to the
    /// executable and then in the working directory.
    #[builder(into)]
    pub icon_dir: Option<PathBuf>,
    #[builder(into, default = ICON_DIR_NAME.to_string())]
    pub icon_dir_name: String,
    /// Resolution reports are saved at.
    #[builder(default = DEFAULT_DPI)]
    pub report_dpi: u32,
    /// Pixel size of the icons in dashboard cells.
    #[builder(default = DEFAULT_ICON_SIZE)]
    pub icon_size: (u32, u32),
    #[builder(default)]
    pub style: ChartStyle,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl VisualizerConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::FileRead`] if the file cannot be read and
    /// [`DataError::JsonParse`] if it is not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        read_json(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::color::HexColor;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.icon_dir, None);
        assert_eq!(config.icon_dir_name, ICON_DIR_NAME);
        assert_eq!(config.report_dpi, 300);
        assert_eq!(config.style, ChartStyle::default());
    }

    #[test]
    fn test_partial_file_overrides_style() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{"icon_dir": "icons", "style": {{"temperature": "#112233", "category_palette": {{"Niebla": "#CCCCCC"}}}}}}"##
        )
        .unwrap();
        let config = VisualizerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.icon_dir, Some(PathBuf::from("icons")));
        assert_eq!(config.style.temperature, HexColor(0x11, 0x22, 0x33));
        assert_eq!(config.style.humidity, ChartStyle::default().humidity);
        assert_eq!(config.style.category_palette.len(), 1);
    }

    #[test]
    fn test_bad_colour_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"style": {{"temperature": "red"}}}}"#).unwrap();
        assert!(matches!(
            VisualizerConfig::from_json_file(file.path()),
            Err(DataError::JsonParse(_, _))
        ));
    }
}
