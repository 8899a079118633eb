use std::path::PathBuf;

use thiserror::Error;

/// Result alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A sampling or rendering call was made before `Camera::initialize`,
    /// or after a framing setting changed without re-initializing.
    #[error("camera viewport is missing or stale; call initialize() after configuring")]
    NotInitialized,

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
