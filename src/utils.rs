use crate::icons::error::IconError;
use std::path::{Path, PathBuf};

/// Default name of the directory holding the weather icon files.
pub const ICON_DIR_NAME: &str = "Imagenes-Clima";

/// Directory containing the running executable, if it can be determined.
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Candidate locations for the icon directory, in lookup order: the configured
/// directory (or `dir_name` next to the executable), then `dir_name` relative to the
/// current working directory.
pub fn icon_dir_candidates(configured: Option<&Path>, dir_name: &str) -> Vec<PathBuf> {
    let primary = match configured {
        Some(dir) => Some(dir.to_path_buf()),
        None => executable_dir().map(|dir| dir.join(dir_name)),
    };
    primary
        .into_iter()
        .chain(std::iter::once(PathBuf::from(dir_name)))
        .collect()
}

/// Returns the first candidate that exists and is a directory.
pub fn first_existing_dir(candidates: Vec<PathBuf>) -> Result<PathBuf, IconError> {
    match candidates.iter().find(|path| path.is_dir()) {
        Some(path) => Ok(path.clone()),
        None => Err(IconError::DirectoryMissing(candidates)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dir_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = icon_dir_candidates(Some(dir.path()), ICON_DIR_NAME);
        assert_eq!(candidates[0], dir.path());
        assert_eq!(candidates.last().unwrap(), &PathBuf::from(ICON_DIR_NAME));
        assert_eq!(first_existing_dir(candidates).unwrap(), dir.path());
    }

    #[test]
    fn test_no_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = first_existing_dir(vec![missing.clone()]);
        match result {
            Err(IconError::DirectoryMissing(paths)) => assert_eq!(paths, vec![missing]),
            other => panic!("expected DirectoryMissing, got {other:?}"),
        }
    }
}
