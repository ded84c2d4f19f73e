//! Book processors: whole-book transforms run before a book is written out

mod cover;
mod section_title;

pub use cover::{cover_page_html, find_cover_image, CoverPageProcessor};
pub use section_title::{read_title, SectionTitleProcessor};

use crate::error::ParseError;
use crate::types::{Book, Resource};
use scraper::Html;

/// A transform applied once to a whole book
///
/// Processors are best-effort: internal failures are logged and the book is
/// handed back in a consistent state.
pub trait BookProcessor: Send + Sync {
    /// Transform the book
    fn process(&self, book: Book) -> Book;

    /// Short name used in logs and by [`processor_for_name`]
    fn name(&self) -> &str;
}

/// Get a processor by name
pub fn processor_for_name(name: &str) -> Option<Box<dyn BookProcessor>> {
    match name.to_lowercase().as_str() {
        "cover" | "cover-page" => Some(Box::new(CoverPageProcessor::new())),
        "section-titles" | "titles" => Some(Box::new(SectionTitleProcessor::new())),
        _ => None,
    }
}

/// An ordered list of processors
pub struct Pipeline {
    processors: Vec<Box<dyn BookProcessor>>,
}

impl Pipeline {
    /// A pipeline with no processors
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Cover reconciliation followed by section title backfill
    pub fn standard() -> Self {
        Self::new()
            .with_processor(Box::new(CoverPageProcessor::new()))
            .with_processor(Box::new(SectionTitleProcessor::new()))
    }

    /// Append a processor
    pub fn with_processor(mut self, processor: Box<dyn BookProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    /// Names of the processors, in run order
    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Run every processor once, in order
    pub fn run(&self, book: Book) -> Book {
        self.processors.iter().fold(book, |book, processor| {
            tracing::debug!("Running book processor '{}'", processor.name());
            processor.process(book)
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read a resource and parse it as an HTML document
pub(crate) fn parse_markup(resource: &Resource) -> Result<Html, ParseError> {
    let bytes = resource.bytes().map_err(|source| ParseError::Read {
        href: resource.href.clone(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| ParseError::InvalidHtml {
        href: resource.href.clone(),
        reason: e.to_string(),
    })?;
    Ok(Html::parse_document(&text))
}
