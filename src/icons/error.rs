use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("Icon directory not found (looked in {0:?})")]
    DirectoryMissing(Vec<PathBuf>),

    #[error("Icon file '{0}' does not exist")]
    FileMissing(PathBuf),

    #[error("Failed to decode icon '{0}'")]
    Decode(PathBuf, #[source] image::ImageError),

    #[error("Icon buffer of {len} values does not match {width}x{height} RGBA")]
    BufferSize { width: u32, height: u32, len: usize },
}
