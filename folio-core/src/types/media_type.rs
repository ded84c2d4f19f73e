//! Media types of package members

use serde::{Deserialize, Serialize};
use std::fmt;

/// The media type of a resource inside a book package
///
/// Serialized as its MIME name so stored books stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Xhtml,
    Html,
    Css,
    Ncx,
    Opf,
    Png,
    Jpeg,
    Gif,
    Svg,
    Ttf,
    Otf,
    Woff,
    Woff2,
    JavaScript,
    /// Anything this crate has no special knowledge of
    Other(String),
}

impl MediaType {
    /// MIME name (e.g., "application/xhtml+xml")
    pub fn mime(&self) -> &str {
        match self {
            MediaType::Xhtml => "application/xhtml+xml",
            MediaType::Html => "text/html",
            MediaType::Css => "text/css",
            MediaType::Ncx => "application/x-dtbncx+xml",
            MediaType::Opf => "application/oebps-package+xml",
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Gif => "image/gif",
            MediaType::Svg => "image/svg+xml",
            MediaType::Ttf => "application/x-font-ttf",
            MediaType::Otf => "application/vnd.ms-opentype",
            MediaType::Woff => "application/font-woff",
            MediaType::Woff2 => "font/woff2",
            MediaType::JavaScript => "text/javascript",
            MediaType::Other(mime) => mime,
        }
    }

    /// Canonical file extension, including the leading dot
    pub fn default_extension(&self) -> &str {
        match self {
            MediaType::Xhtml => ".xhtml",
            MediaType::Html => ".html",
            MediaType::Css => ".css",
            MediaType::Ncx => ".ncx",
            MediaType::Opf => ".opf",
            MediaType::Png => ".png",
            MediaType::Jpeg => ".jpg",
            MediaType::Gif => ".gif",
            MediaType::Svg => ".svg",
            MediaType::Ttf => ".ttf",
            MediaType::Otf => ".otf",
            MediaType::Woff => ".woff",
            MediaType::Woff2 => ".woff2",
            MediaType::JavaScript => ".js",
            MediaType::Other(_) => "",
        }
    }

    /// Guess the media type from the extension of an href
    pub fn from_href(href: &str) -> Self {
        let file_name = href.rsplit('/').next().unwrap_or(href);
        let ext = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => return MediaType::Other("application/octet-stream".to_string()),
        };

        match ext.as_str() {
            "xhtml" => MediaType::Xhtml,
            "html" | "htm" => MediaType::Html,
            "css" => MediaType::Css,
            "ncx" => MediaType::Ncx,
            "opf" => MediaType::Opf,
            "png" => MediaType::Png,
            "jpg" | "jpeg" => MediaType::Jpeg,
            "gif" => MediaType::Gif,
            "svg" => MediaType::Svg,
            "ttf" => MediaType::Ttf,
            "otf" => MediaType::Otf,
            "woff" => MediaType::Woff,
            "woff2" => MediaType::Woff2,
            "js" => MediaType::JavaScript,
            _ => MediaType::Other("application/octet-stream".to_string()),
        }
    }

    /// Parse a MIME name
    pub fn from_mime(mime: &str) -> Self {
        match mime.to_lowercase().as_str() {
            "application/xhtml+xml" => MediaType::Xhtml,
            "text/html" => MediaType::Html,
            "text/css" => MediaType::Css,
            "application/x-dtbncx+xml" => MediaType::Ncx,
            "application/oebps-package+xml" => MediaType::Opf,
            "image/png" => MediaType::Png,
            "image/jpeg" | "image/jpg" => MediaType::Jpeg,
            "image/gif" => MediaType::Gif,
            "image/svg+xml" => MediaType::Svg,
            "application/x-font-ttf" | "font/ttf" => MediaType::Ttf,
            "application/vnd.ms-opentype" | "font/otf" => MediaType::Otf,
            "application/font-woff" | "font/woff" => MediaType::Woff,
            "font/woff2" => MediaType::Woff2,
            "text/javascript" | "application/javascript" => MediaType::JavaScript,
            _ => MediaType::Other(mime.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl From<String> for MediaType {
    fn from(mime: String) -> Self {
        MediaType::from_mime(&mime)
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        media_type.mime().to_string()
    }
}
