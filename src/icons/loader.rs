//! Loading icon files from the icon directory.

use crate::icons::error::IconError;
use crate::icons::icon::{Icon, IconKind};
use crate::utils::{first_existing_dir, icon_dir_candidates, ICON_DIR_NAME};
use log::{debug, error, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where icons come from.
///
/// Implemented by [`IconLoader`] for the filesystem and by `HashMap<IconKind, Icon>`
/// for icons already held in memory. `None` means "not available"; implementations
/// never fail loudly.
pub trait IconSource {
    fn load(&self, kind: IconKind) -> Option<Icon>;
}

impl IconSource for HashMap<IconKind, Icon> {
    fn load(&self, kind: IconKind) -> Option<Icon> {
        self.get(&kind).cloned()
    }
}

impl<S: IconSource + ?Sized> IconSource for &S {
    fn load(&self, kind: IconKind) -> Option<Icon> {
        (**self).load(kind)
    }
}

/// Reads icon files from disk.
///
/// The directory is looked up on every request, so an icon directory created after
/// start-up is picked up.
#[derive(Debug, Clone)]
pub struct IconLoader {
    configured_dir: Option<PathBuf>,
    dir_name: String,
}

impl Default for IconLoader {
    fn default() -> Self {
        Self::new(None, ICON_DIR_NAME)
    }
}

impl IconLoader {
    /// # Arguments
    ///
    /// * `configured_dir` - Explicit icon directory. When `None`, `dir_name` next to the
    ///   running executable is tried first.
    /// * `dir_name` - Directory name, also tried relative to the working directory.
    pub fn new(configured_dir: Option<PathBuf>, dir_name: impl Into<String>) -> Self {
        Self {
            configured_dir,
            dir_name: dir_name.into(),
        }
    }

    /// Loader reading from exactly `dir` (with the working-directory fallback).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Some(dir.into()), ICON_DIR_NAME)
    }

    /// The directory icons are currently read from.
    pub fn resource_dir(&self) -> Result<PathBuf, IconError> {
        first_existing_dir(icon_dir_candidates(
            self.configured_dir.as_deref(),
            &self.dir_name,
        ))
    }

    /// Loads one icon, reporting why it is unavailable.
    pub fn try_load(&self, kind: IconKind) -> Result<Icon, IconError> {
        let dir = self.resource_dir()?;
        load_file(&dir, kind)
    }
}

impl IconSource for IconLoader {
    fn load(&self, kind: IconKind) -> Option<Icon> {
        match self.try_load(kind) {
            Ok(icon) => {
                debug!("Loaded icon {}", kind);
                Some(icon)
            }
            Err(e @ IconError::DirectoryMissing(_)) => {
                warn!("{e}");
                None
            }
            Err(e @ IconError::FileMissing(_)) => {
                warn!("{e}");
                None
            }
            Err(e) => {
                error!("Failed to load icon {}: {:?}", kind, e);
                None
            }
        }
    }
}

fn load_file(dir: &Path, kind: IconKind) -> Result<Icon, IconError> {
    let path = dir.join(kind.file_name());
    if !path.is_file() {
        return Err(IconError::FileMissing(path));
    }
    let image = image::open(&path).map_err(|e| IconError::Decode(path, e))?;
    Ok(Icon::from_image(kind, image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_icon(dir: &Path, kind: IconKind) {
        RgbImage::from_pixel(4, 3, Rgb([200, 100, 0]))
            .save(dir.join(kind.file_name()))
            .unwrap();
    }

    #[test]
    fn test_load_existing_icon() {
        let dir = tempfile::tempdir().unwrap();
        write_icon(dir.path(), IconKind::Sunny);
        let loader = IconLoader::with_dir(dir.path());

        let icon = loader.load(IconKind::Sunny).unwrap();
        assert_eq!(icon.kind(), IconKind::Sunny);
        assert_eq!((icon.width(), icon.height()), (4, 3));
        assert!(icon.pixels().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!((icon.pixels()[0] - 200.0 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loader = IconLoader::with_dir(dir.path());
        assert!(loader.load(IconKind::Cold).is_none());
        assert!(matches!(
            loader.try_load(IconKind::Cold),
            Err(IconError::FileMissing(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(IconKind::Cloudy.file_name()), b"not a png").unwrap();
        let loader = IconLoader::with_dir(dir.path());
        assert!(loader.load(IconKind::Cloudy).is_none());
        assert!(matches!(
            loader.try_load(IconKind::Cloudy),
            Err(IconError::Decode(_, _))
        ));
    }

    #[test]
    fn test_missing_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loader = IconLoader::new(
            Some(dir.path().join("absent")),
            "definitely-not-an-icon-dir",
        );
        assert!(loader.load(IconKind::Sunny).is_none());
        assert!(matches!(
            loader.resource_dir(),
            Err(IconError::DirectoryMissing(_))
        ));
    }
}
