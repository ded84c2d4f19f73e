//! Fill in blank TOC titles from the `<title>` of the referenced document

use super::{parse_markup, BookProcessor};
use crate::error::ParseError;
use crate::types::{Book, Resource, Section};
use scraper::Selector;

/// Gives untitled sections the title of the document they point at
pub struct SectionTitleProcessor;

impl SectionTitleProcessor {
    pub fn new() -> Self {
        Self
    }

    fn fill_titles(&self, sections: &mut [Section], book: &Book) {
        for section in sections {
            if section.has_blank_title() {
                if let Some(href) = section.href.as_deref() {
                    match lookup_title(href, book) {
                        Ok(Some(title)) => section.title = title,
                        Ok(None) => {}
                        Err(e) => tracing::warn!("Could not read title for section: {}", e),
                    }
                }
            }
            self.fill_titles(&mut section.children, book);
        }
    }
}

impl Default for SectionTitleProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BookProcessor for SectionTitleProcessor {
    fn process(&self, mut book: Book) -> Book {
        let mut toc = std::mem::take(&mut book.toc);
        self.fill_titles(&mut toc, &book);
        book.toc = toc;
        book
    }

    fn name(&self) -> &str {
        "section-titles"
    }
}

fn lookup_title(href: &str, book: &Book) -> Result<Option<String>, ParseError> {
    let resource = book
        .resource(href)
        .ok_or_else(|| ParseError::ResourceNotFound(href.to_string()))?;
    read_title(resource)
}

/// Text of the document's `html > head > title`, if it has one
pub fn read_title(resource: &Resource) -> Result<Option<String>, ParseError> {
    let document = parse_markup(resource)?;
    let selector = Selector::parse("html > head > title").map_err(|e| ParseError::InvalidHtml {
        href: resource.href.clone(),
        reason: e.to_string(),
    })?;

    Ok(document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>()))
}
