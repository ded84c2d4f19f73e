//! Book metadata types (Dublin Core subset plus the guide)

use super::Resource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Manifest id given to the resolved cover image
pub const COVER_IMAGE_ID: &str = "cover-image";

/// Manifest id given to the resolved cover page
pub const COVER_PAGE_ID: &str = "cover";

/// Language used when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Book metadata following the Dublin Core elements epub packages carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    /// Titles; the first one is the main title
    pub titles: Vec<String>,

    /// Authors/creators
    pub creators: Vec<String>,

    /// Subject/genre tags
    pub subjects: Vec<String>,

    /// Book description/summary
    pub description: Option<String>,

    /// Publisher name
    pub publisher: Option<String>,

    /// Publication date
    pub date: Option<DateTime<Utc>>,

    /// Language code (ISO 639-1)
    pub language: String,

    /// ISBN or UUID identifier
    pub identifier: String,

    /// Copyright/rights information
    pub rights: Option<String>,

    /// Semantic references into the package
    pub guide: Guide,
}

impl Metadata {
    /// Empty metadata with a fresh identifier and the default language
    pub fn new() -> Self {
        Self {
            titles: Vec::new(),
            creators: Vec::new(),
            subjects: Vec::new(),
            description: None,
            publisher: None,
            date: None,
            language: DEFAULT_LANGUAGE.to_string(),
            identifier: uuid::Uuid::new_v4().to_string(),
            rights: None,
            guide: Guide::default(),
        }
    }

    /// Main title, if the book has any
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(|s| s.as_str())
    }

    /// Append a title
    pub fn add_title(&mut self, title: impl Into<String>) {
        self.titles.push(title.into());
    }

    /// Add a title, builder style
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.push(title.into());
        self
    }

    /// Add an author/creator
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creators.push(creator.into());
        self
    }

    /// Cover image held by the guide
    pub fn cover_image(&self) -> Option<&Resource> {
        self.guide.cover_image.as_ref()
    }

    /// Cover page held by the guide
    pub fn cover_page(&self) -> Option<&Resource> {
        self.guide.cover_page.as_ref()
    }

    /// Replace the guide's cover image
    pub fn set_cover_image(&mut self, cover_image: Option<Resource>) {
        self.guide.cover_image = cover_image;
    }

    /// Replace the guide's cover page
    pub fn set_cover_page(&mut self, cover_page: Option<Resource>) {
        self.guide.cover_page = cover_page;
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Cover references of a book
///
/// The guide owns its resources. A cover image pulled out of the cover page
/// is moved here from [`super::Resources`] so the package lists it once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Guide {
    pub cover_image: Option<Resource>,
    pub cover_page: Option<Resource>,
}

impl Guide {
    /// Look up either cover resource by href
    pub fn get(&self, href: &str) -> Option<&Resource> {
        [self.cover_page.as_ref(), self.cover_image.as_ref()]
            .into_iter()
            .flatten()
            .find(|r| r.href == href)
    }
}
