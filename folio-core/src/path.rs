//! Resolving hrefs found inside package markup
//!
//! Hrefs are `/`-separated strings relative to the package root, not
//! filesystem paths.

use crate::error::PathError;

/// Resolve `relative` against the href of the document that contains it
///
/// An href starting with `/` is already rooted in the package and comes back
/// unchanged. Anything else is appended to the directory of `base` and
/// collapsed with [`collapse_dots`].
///
/// ```
/// use folio_core::path::resolve_href;
///
/// assert_eq!(resolve_href("img.png", "chapter1/index.html").unwrap(), "chapter1/img.png");
/// assert_eq!(resolve_href("/x/img.png", "chapter1/index.html").unwrap(), "/x/img.png");
/// ```
pub fn resolve_href(relative: &str, base: &str) -> Result<String, PathError> {
    if relative.starts_with('/') {
        return Ok(relative.to_string());
    }
    collapse_dots(&format!("{}{}", parent_dir(base), relative))
}

/// Everything up to and including the last `/`, or "" for a bare file name
pub fn parent_dir(href: &str) -> &str {
    match href.rfind('/') {
        Some(idx) => &href[..=idx],
        None => "",
    }
}

/// Remove empty, `.` and `..` segments from an href
///
/// A `..` removes itself and the segment before it, and scanning picks up at
/// the same index, so the segment that followed the `..` is kept as written
/// (`a/b/.././c` becomes `a/./c`). The final segment is never touched, so a
/// trailing `/` survives. A `..` in the first position is an error.
pub fn collapse_dots(path: &str) -> Result<String, PathError> {
    let mut parts: Vec<&str> = path.split('/').collect();

    let mut i = 0;
    while i + 1 < parts.len() {
        match parts[i] {
            "" | "." => {
                parts.remove(i);
            }
            ".." => {
                if i == 0 {
                    return Err(PathError::MalformedPath {
                        path: path.to_string(),
                    });
                }
                parts.drain(i - 1..=i);
            }
            _ => i += 1,
        }
    }

    let joined = parts.join("/");
    if path.starts_with('/') {
        Ok(format!("/{joined}"))
    } else {
        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_parent() {
        assert_eq!(collapse_dots("a/b/../c").unwrap(), "a/c");
        assert_eq!(collapse_dots("a/b/../../c").unwrap(), "a/../c");
        assert_eq!(collapse_dots("OEBPS/text/../images/cover.jpg").unwrap(), "OEBPS/images/cover.jpg");
    }

    #[test]
    fn test_collapse_keeps_trailing_segment() {
        assert_eq!(collapse_dots("a/./b/").unwrap(), "a/b/");
        assert_eq!(collapse_dots("a/b/.").unwrap(), "a/b/.");
        assert_eq!(collapse_dots("a/b/..").unwrap(), "a/b/..");
    }

    #[test]
    fn test_collapse_absolute() {
        assert_eq!(collapse_dots("/a/../b").unwrap(), "/b");
        assert_eq!(collapse_dots("//a//b").unwrap(), "/a/b");
    }

    #[test]
    fn test_collapse_skips_segment_after_parent() {
        assert_eq!(collapse_dots("a/b/.././c").unwrap(), "a/./c");
        assert_eq!(collapse_dots("a/b/..//c").unwrap(), "a//c");
        assert_eq!(collapse_dots("a/b/.././d/./c").unwrap(), "a/./d/c");
        assert_eq!(collapse_dots("a/../../x").unwrap(), "../x");
    }

    #[test]
    fn test_collapse_plain() {
        assert_eq!(collapse_dots("cover.png").unwrap(), "cover.png");
        assert_eq!(collapse_dots("").unwrap(), "");
    }

    #[test]
    fn test_dangling_parent_is_error() {
        assert_eq!(
            collapse_dots("../x.png"),
            Err(PathError::MalformedPath {
                path: "../x.png".to_string()
            })
        );
        assert!(collapse_dots("/../x.png").is_err());
        assert!(collapse_dots(".//../x.png").is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve_href("img.png", "chapter1/index.html").unwrap(), "chapter1/img.png");
        assert_eq!(resolve_href("/x/img.png", "chapter1/index.html").unwrap(), "/x/img.png");
        assert_eq!(resolve_href("flowers.jpg", "cover.html").unwrap(), "flowers.jpg");
        assert_eq!(
            resolve_href("../images/c.jpg", "text/cover.xhtml").unwrap(),
            "images/c.jpg"
        );
        assert_eq!(
            resolve_href("../../images/c.jpg", "text/sub/cover.xhtml").unwrap(),
            "text/../images/c.jpg"
        );
        assert!(resolve_href("../c.jpg", "cover.xhtml").is_err());
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("a/b/c.html"), "a/b/");
        assert_eq!(parent_dir("c.html"), "");
        assert_eq!(parent_dir("/c.html"), "/");
    }
}
