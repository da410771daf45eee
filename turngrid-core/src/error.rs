//! Error types for turngrid

use thiserror::Error;

/// Main error type for turngrid operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for turngrid operations
pub type Result<T> = std::result::Result<T, Error>;
