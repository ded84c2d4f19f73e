//! Core types: the book, its metadata, resources and table of contents

mod book;
mod media_type;
mod metadata;
mod resource;
mod toc;

pub use book::Book;
pub use media_type::MediaType;
pub use metadata::{Guide, Metadata, COVER_IMAGE_ID, COVER_PAGE_ID, DEFAULT_LANGUAGE};
pub use resource::{Resource, ResourceData, Resources};
pub use toc::{Section, SectionIter};
