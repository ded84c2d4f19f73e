//! Cover page / cover image reconciliation
//!
//! A book may arrive with only a cover image, only a cover page, both, or
//! neither. When only the image is known, a minimal XHTML page showing it is
//! generated. When only the page is known, its first image that exists in the
//! package becomes the cover image and is moved from the resource store into
//! the guide so it is listed once.

use super::{parse_markup, BookProcessor};
use crate::error::ParseError;
use crate::path::resolve_href;
use crate::types::{
    Book, Guide, MediaType, Resource, Resources, COVER_IMAGE_ID, COVER_PAGE_ID,
};
use scraper::Selector;

/// File stem for generated cover resources
const COVER_STEM: &str = "cover";

/// Title used in the generated page when the book has none
const FALLBACK_TITLE: &str = "Cover";

/// Resolves the book's cover image and cover page from one another
pub struct CoverPageProcessor;

impl CoverPageProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Give a nameless cover image an href and build a page around it
    fn create_cover_page(&self, book: &mut Book) -> Option<Resource> {
        let resources = &book.resources;
        let title = book.metadata.title().unwrap_or(FALLBACK_TITLE).to_string();
        let cover_image = book.metadata.guide.cover_image.as_mut()?;

        if cover_image.href.trim().is_empty() {
            cover_image.href =
                resources.unique_href(COVER_STEM, cover_image.media_type.default_extension());
            tracing::debug!("Assigned cover image href '{}'", cover_image.href);
        }

        let html = cover_page_html(&title, &cover_image.href);
        let href = resources.unique_href(COVER_STEM, MediaType::Html.default_extension());
        tracing::debug!("Generated cover page '{}' for '{}'", href, cover_image.href);

        Some(Resource::new(href, MediaType::Xhtml, html.into_bytes()))
    }

    /// Pull the first image of the cover page out of the store
    fn take_cover_image(&self, book: &mut Book) -> Option<Resource> {
        let cover_page = book.metadata.guide.cover_page.as_ref()?;

        let href = match find_cover_image(cover_page, &book.resources) {
            Ok(Some(href)) => href,
            Ok(None) => {
                tracing::debug!("No cover image found in '{}'", cover_page.href);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to scan cover page for an image: {}", e);
                return None;
            }
        };

        book.resources.remove(&href)
    }
}

impl Default for CoverPageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BookProcessor for CoverPageProcessor {
    fn process(&self, mut book: Book) -> Book {
        let guide = &book.metadata.guide;
        match (guide.cover_page.is_some(), guide.cover_image.is_some()) {
            (false, false) => return book,
            (false, true) => {
                let cover_page = self.create_cover_page(&mut book);
                book.metadata.set_cover_page(cover_page);
            }
            (true, false) => {
                let cover_image = self.take_cover_image(&mut book);
                book.metadata.set_cover_image(cover_image);
            }
            (true, true) => {}
        }

        assign_cover_ids(&mut book.metadata.guide);
        book
    }

    fn name(&self) -> &str {
        "cover"
    }
}

fn assign_cover_ids(guide: &mut Guide) {
    if let Some(image) = guide.cover_image.as_mut() {
        image.id = Some(COVER_IMAGE_ID.to_string());
    }
    if let Some(page) = guide.cover_page.as_mut() {
        page.id = Some(COVER_PAGE_ID.to_string());
    }
}

/// Find the href of the first `<img>` in `cover_page` that exists in `resources`
///
/// Image sources are resolved relative to the cover page. Sources that cannot
/// be resolved are skipped; the error covers reading and decoding the page.
pub fn find_cover_image(
    cover_page: &Resource,
    resources: &Resources,
) -> Result<Option<String>, ParseError> {
    let document = parse_markup(cover_page)?;
    let selector = Selector::parse("img").map_err(|e| ParseError::InvalidHtml {
        href: cover_page.href.clone(),
        reason: e.to_string(),
    })?;

    for img in document.select(&selector) {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        let href = match resolve_href(src, &cover_page.href) {
            Ok(href) => href,
            Err(e) => {
                tracing::debug!("Skipping image '{}' in '{}': {}", src, cover_page.href, e);
                continue;
            }
        };
        if resources.contains(&href) {
            return Ok(Some(href));
        }
    }

    Ok(None)
}

/// Minimal XHTML page displaying the cover image
pub fn cover_page_html(title: &str, image_href: &str) -> String {
    let title = escape_html(title);
    let src = escape_html(image_href);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
  <head>
    <title>{title}</title>
    <style type="text/css">img {{ max-width: 100%; }}</style>
  </head>
  <body>
    <div id="cover-image">
      <img src="{src}" alt="{title}"/>
    </div>
  </body>
</html>
"#
    )
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    fn cover_page(href: &str, body: &str) -> Resource {
        let html = format!("<html><head><title>Cover</title></head><body>{body}</body></html>");
        Resource::new(href, MediaType::Xhtml, html.into_bytes())
    }

    #[test]
    fn test_neither_cover_is_noop() {
        let mut book = Book::with_metadata(Metadata::new().with_title("Plain"));
        book.resources
            .add(Resource::new("a.png", MediaType::Png, vec![1]));
        let before = book.clone();

        let after = CoverPageProcessor::new().process(book);
        assert_eq!(after, before);
    }

    #[test]
    fn test_image_only_generates_page() {
        let mut book = Book::with_metadata(Metadata::new().with_title("Alice & Bob"));
        book.metadata
            .set_cover_image(Some(Resource::new("images/front.png", MediaType::Png, vec![1])));

        let book = CoverPageProcessor::new().process(book);
        let page = book.metadata.cover_page().unwrap();
        let image = book.metadata.cover_image().unwrap();

        assert_eq!(page.href, "cover.html");
        assert_eq!(page.media_type, MediaType::Xhtml);
        assert_eq!(page.id.as_deref(), Some("cover"));
        assert_eq!(image.id.as_deref(), Some("cover-image"));

        let html = String::from_utf8(page.bytes().unwrap()).unwrap();
        assert!(html.contains(r#"<img src="images/front.png" alt="Alice &amp; Bob"/>"#));
        assert!(html.contains("<title>Alice &amp; Bob</title>"));
    }

    #[test]
    fn test_blank_image_href_gets_default() {
        let mut book = Book::new();
        book.metadata
            .set_cover_image(Some(Resource::new("", MediaType::Jpeg, vec![1])));

        let book = CoverPageProcessor::new().process(book);
        assert_eq!(book.metadata.cover_image().unwrap().href, "cover.jpg");

        let html = String::from_utf8(book.metadata.cover_page().unwrap().bytes().unwrap()).unwrap();
        assert!(html.contains(r#"src="cover.jpg""#));
        assert!(html.contains("<title>Cover</title>"));
    }

    #[test]
    fn test_generated_hrefs_avoid_existing_resources() {
        let mut book = Book::new();
        book.resources
            .add(Resource::new("cover.html", MediaType::Html, vec![]));
        book.resources
            .add(Resource::new("cover.png", MediaType::Png, vec![]));
        book.metadata
            .set_cover_image(Some(Resource::new(" ", MediaType::Png, vec![1])));

        let book = CoverPageProcessor::new().process(book);
        assert_eq!(book.metadata.cover_image().unwrap().href, "cover-1.png");
        assert_eq!(book.metadata.cover_page().unwrap().href, "cover-1.html");
        assert_eq!(book.resources.len(), 2);
    }

    #[test]
    fn test_page_only_takes_first_resolvable_image() {
        let mut book = Book::new();
        book.resources
            .add(Resource::new("text/images/b.jpg", MediaType::Jpeg, vec![2]));
        book.resources
            .add(Resource::new("text/images/c.jpg", MediaType::Jpeg, vec![3]));
        book.metadata.set_cover_page(Some(cover_page(
            "text/cover.xhtml",
            r#"<img src="missing.png"/><img alt="no src"/><img src="images/b.jpg"/><img src="images/c.jpg"/>"#,
        )));

        let book = CoverPageProcessor::new().process(book);
        let image = book.metadata.cover_image().unwrap();
        assert_eq!(image.href, "text/images/b.jpg");
        assert_eq!(image.id.as_deref(), Some("cover-image"));
        assert!(!book.resources.contains("text/images/b.jpg"));
        assert!(book.resources.contains("text/images/c.jpg"));
    }

    #[test]
    fn test_page_only_skips_malformed_src() {
        let mut book = Book::new();
        book.resources
            .add(Resource::new("img.png", MediaType::Png, vec![1]));
        book.metadata.set_cover_page(Some(cover_page(
            "cover.xhtml",
            r#"<img src="../../img.png"/><img src="img.png"/>"#,
        )));

        let book = CoverPageProcessor::new().process(book);
        assert_eq!(book.metadata.cover_image().unwrap().href, "img.png");
    }

    #[test]
    fn test_page_only_without_match_keeps_image_absent() {
        let mut book = Book::new();
        book.resources
            .add(Resource::new("other.png", MediaType::Png, vec![1]));
        book.metadata
            .set_cover_page(Some(cover_page("cover.xhtml", r#"<img src="nope.png"/>"#)));

        let book = CoverPageProcessor::new().process(book);
        assert!(book.metadata.cover_image().is_none());
        assert_eq!(book.metadata.cover_page().unwrap().id.as_deref(), Some("cover"));
        assert_eq!(book.resources.len(), 1);
    }

    #[test]
    fn test_unreadable_page_is_not_fatal() {
        let mut book = Book::new();
        book.resources
            .add(Resource::new("a.png", MediaType::Png, vec![1]));
        book.metadata.set_cover_page(Some(Resource::new(
            "cover.xhtml",
            MediaType::Xhtml,
            vec![0xff, 0xfe, 0x00, 0x3c],
        )));

        let book = CoverPageProcessor::new().process(book);
        assert!(book.metadata.cover_image().is_none());
        assert!(book.resources.contains("a.png"));
    }

    #[test]
    fn test_both_present_only_sets_ids() {
        let mut book = Book::new();
        book.metadata
            .set_cover_image(Some(Resource::new("c.png", MediaType::Png, vec![1])));
        book.metadata
            .set_cover_page(Some(cover_page("c.xhtml", r#"<img src="other.png"/>"#)));

        let book = CoverPageProcessor::new().process(book);
        assert_eq!(book.metadata.cover_image().unwrap().href, "c.png");
        assert_eq!(book.metadata.cover_page().unwrap().href, "c.xhtml");
        assert_eq!(book.metadata.cover_image().unwrap().id.as_deref(), Some("cover-image"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    }
}
