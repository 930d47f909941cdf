use thiserror::Error;

/// A result type for gallery errors
pub type Result<T> = std::result::Result<T, GalleryError>;

/// An error for gallery generation
#[derive(Error, Debug)]
pub enum GalleryError {
    /// When configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When the surrogate model fails
    #[error("GP error")]
    GpError(#[from] egallery_gp::GpError),
    /// When an invalid value is encountered
    #[error("Value error: {0}")]
    InvalidValue(String),
}
