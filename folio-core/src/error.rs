//! Error types for Folio Core

use thiserror::Error;

/// Result type alias using FolioError
pub type Result<T> = std::result::Result<T, FolioError>;

/// Top-level error type for all Folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while reading markup out of a resource
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid HTML in {href}: {reason}")]
    InvalidHtml { href: String, reason: String },

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Failed to read {href}: {source}")]
    Read {
        href: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by the href resolver
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A `..` segment with nothing left to climb out of
    #[error("Malformed path: {path}")]
    MalformedPath { path: String },
}

/// Errors that occur while generating thumbnails
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid thumbnail size: {0}")]
    InvalidSize(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
