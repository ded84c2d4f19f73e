//! The main Book type - everything the pipeline works on

use super::{Metadata, Resource, Resources, Section, SectionIter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The complete book: metadata, package members and table of contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier for this book
    pub id: Uuid,

    /// Book metadata (titles, authors, guide)
    pub metadata: Metadata,

    /// Package members, keyed by href
    pub resources: Resources,

    /// Table of contents
    pub toc: Vec<Section>,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::with_metadata(Metadata::new())
    }

    /// Create a book with existing metadata
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            metadata,
            resources: Resources::new(),
            toc: Vec::new(),
        }
    }

    /// Add a resource to the package and a top-level TOC entry pointing at it
    pub fn add_resource_as_section(
        &mut self,
        title: impl Into<String>,
        resource: Resource,
    ) -> &mut Section {
        let section = Section::new(title, resource.href.clone());
        self.resources.add(resource);
        let index = self.toc.len();
        self.toc.push(section);
        &mut self.toc[index]
    }

    /// Add a resource to the package and a TOC entry nested under `parent`
    pub fn add_resource_as_subsection<'a>(
        &mut self,
        parent: &'a mut Section,
        title: impl Into<String>,
        resource: Resource,
    ) -> &'a mut Section {
        let section = Section::new(title, resource.href.clone());
        self.resources.add(resource);
        parent.add_child(section)
    }

    /// Look up a resource by href, in the store first and then the guide
    pub fn resource(&self, href: &str) -> Option<&Resource> {
        self.resources
            .get(href)
            .or_else(|| self.metadata.guide.get(href))
    }

    /// All TOC entries, pre-order
    pub fn sections(&self) -> SectionIter<'_> {
        SectionIter::over(&self.toc)
    }

    /// Get the book title
    pub fn title(&self) -> Option<&str> {
        self.metadata.title()
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    #[test]
    fn test_book_creation() {
        let mut book = Book::with_metadata(Metadata::new().with_title("Test Book"));
        assert_eq!(book.title(), Some("Test Book"));
        assert!(book.toc.is_empty());

        let chapter = Resource::new("chapter1.html", MediaType::Html, b"<p>hi</p>".to_vec());
        book.add_resource_as_section("Chapter 1", chapter);

        assert_eq!(book.toc.len(), 1);
        assert_eq!(book.toc[0].href.as_deref(), Some("chapter1.html"));
        assert!(book.resources.contains("chapter1.html"));
    }

    #[test]
    fn test_nested_sections() {
        let mut book = Book::new();
        let mut part = Section::heading("Part");
        book.add_resource_as_subsection(
            &mut part,
            "Inner",
            Resource::new("inner.html", MediaType::Html, vec![]),
        );
        book.toc.push(part);
        book.add_resource_as_section("Outer", Resource::new("outer.html", MediaType::Html, vec![]));

        let titles: Vec<&str> = book.sections().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Part", "Inner", "Outer"]);
    }

    #[test]
    fn test_resource_lookup_falls_back_to_guide() {
        let mut book = Book::new();
        book.metadata
            .set_cover_page(Some(Resource::new("cover.html", MediaType::Html, vec![])));
        assert!(book.resource("cover.html").is_some());
        assert!(book.resource("missing.html").is_none());
    }

    #[test]
    fn test_book_serialization() {
        let book = Book::with_metadata(Metadata::new().with_title("Serialization Test"));
        let json = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }
}
