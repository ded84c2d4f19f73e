//! Cover thumbnails
//!
//! Not part of the default pipeline; callers that want a scaled-down cover
//! ask for one explicitly.

use crate::config::ProcessorConfig;
use crate::error::ThumbnailError;
use crate::types::{Book, MediaType, Resource};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Output encoding for thumbnails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThumbnailFormat {
    #[default]
    Png,
    Jpeg,
}

impl ThumbnailFormat {
    fn image_format(self) -> ImageFormat {
        match self {
            ThumbnailFormat::Png => ImageFormat::Png,
            ThumbnailFormat::Jpeg => ImageFormat::Jpeg,
        }
    }

    /// Media type of the encoded output
    pub fn media_type(self) -> MediaType {
        match self {
            ThumbnailFormat::Png => MediaType::Png,
            ThumbnailFormat::Jpeg => MediaType::Jpeg,
        }
    }
}

/// How to build a thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailOptions {
    /// Size of the larger side, in pixels
    pub max_dimension: u32,
    /// Keep the alpha channel (PNG only)
    pub preserve_alpha: bool,
    pub format: ThumbnailFormat,
}

impl ThumbnailOptions {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension,
            preserve_alpha: false,
            format: ThumbnailFormat::Png,
        }
    }

    pub fn with_preserve_alpha(mut self, preserve_alpha: bool) -> Self {
        self.preserve_alpha = preserve_alpha;
        self
    }

    pub fn with_format(mut self, format: ThumbnailFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self::from(&ProcessorConfig::default())
    }
}

impl From<&ProcessorConfig> for ThumbnailOptions {
    fn from(config: &ProcessorConfig) -> Self {
        Self::new(config.max_cover_image_size)
    }
}

/// Target size keeping the aspect ratio, with the larger side set to `max`
///
/// The smaller side is truncated, not rounded, and never drops below one
/// pixel. Square images map both sides to `max`.
pub fn calculate_thumbnail_size(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = |side: u32, long: u32| -> u32 {
        let scaled = (max as f64 / long as f64 * side as f64) as u32;
        scaled.max(1)
    };

    if width > height {
        (max, scale(height, width))
    } else {
        (scale(width, height), max)
    }
}

/// Decode `data`, scale it down (or up) to fit `options`, and re-encode it
pub fn create_thumbnail(data: &[u8], options: &ThumbnailOptions) -> Result<Vec<u8>, ThumbnailError> {
    if options.max_dimension == 0 {
        return Err(ThumbnailError::InvalidSize(options.max_dimension));
    }

    let original = image::load_from_memory(data).map_err(ThumbnailError::Decode)?;
    let (width, height) =
        calculate_thumbnail_size(original.width(), original.height(), options.max_dimension);
    let resized = original.resize_exact(width, height, FilterType::Triangle);

    let keep_alpha = options.preserve_alpha && options.format == ThumbnailFormat::Png;
    let output = if keep_alpha {
        DynamicImage::ImageRgba8(resized.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    };

    let mut buf = Vec::new();
    output
        .write_to(&mut Cursor::new(&mut buf), options.format.image_format())
        .map_err(ThumbnailError::Encode)?;

    tracing::debug!(
        "Created {}x{} thumbnail from {}x{} image",
        width,
        height,
        original.width(),
        original.height()
    );

    Ok(buf)
}

/// Thumbnail of the book's cover image as a new resource
///
/// Returns `Ok(None)` when the book has no cover image. The resource is not
/// added to the book.
pub fn create_cover_thumbnail(
    book: &Book,
    options: &ThumbnailOptions,
) -> Result<Option<Resource>, ThumbnailError> {
    let Some(cover_image) = book.metadata.cover_image() else {
        return Ok(None);
    };

    let data = cover_image.bytes()?;
    let thumbnail = create_thumbnail(&data, options)?;
    let media_type = options.format.media_type();
    let href = book
        .resources
        .unique_href("cover-thumbnail", media_type.default_extension());

    Ok(Some(Resource::new(href, media_type, thumbnail)))
}
