//! Folio Core Library
//!
//! This crate normalizes a book's metadata before it is written to a package:
//! it reconciles the cover image with the cover page, fills in blank
//! table-of-contents titles from the documents they point at, and can produce
//! cover thumbnails on request.

pub mod config;
pub mod error;
pub mod path;
pub mod processor;
pub mod thumbnail;
pub mod types;

pub use config::ProcessorConfig;
pub use error::{ConfigError, FolioError, ParseError, PathError, Result, ThumbnailError};
pub use processor::{BookProcessor, CoverPageProcessor, Pipeline, SectionTitleProcessor};
pub use types::{
    Book, Guide, MediaType, Metadata, Resource, ResourceData, Resources, Section,
    COVER_IMAGE_ID, COVER_PAGE_ID,
};
