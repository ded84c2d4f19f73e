//! Package members (markup, images, stylesheets, etc.) and the store holding them

use super::MediaType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::PathBuf;

/// How resource data is stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "storage", content = "value", rename_all = "snake_case")]
pub enum ResourceData {
    /// Data stored directly in memory
    Inline(#[serde(with = "base64_serde")] Vec<u8>),

    /// Data read lazily from a file on disk
    File { path: PathBuf },
}

impl ResourceData {
    /// Open a byte stream over the data
    pub fn open(&self) -> std::io::Result<Box<dyn Read + '_>> {
        match self {
            ResourceData::Inline(data) => Ok(Box::new(Cursor::new(data.as_slice()))),
            ResourceData::File { path } => Ok(Box::new(std::fs::File::open(path)?)),
        }
    }

    /// Get data as bytes (loads from disk if needed)
    pub fn as_bytes(&self) -> std::io::Result<Vec<u8>> {
        match self {
            ResourceData::Inline(data) => Ok(data.clone()),
            ResourceData::File { path } => std::fs::read(path),
        }
    }
}

/// A single member of the book package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    /// Manifest identifier, assigned when the resource gets a fixed role
    pub id: Option<String>,

    /// Package-relative location, unique within [`Resources`]
    pub href: String,

    /// Media type of the data
    pub media_type: MediaType,

    /// The resource data
    pub data: ResourceData,
}

impl Resource {
    /// Create a new inline resource
    pub fn new(href: impl Into<String>, media_type: MediaType, data: Vec<u8>) -> Self {
        Self {
            id: None,
            href: href.into(),
            media_type,
            data: ResourceData::Inline(data),
        }
    }

    /// Create a resource backed by a file; the media type is taken from the href
    pub fn from_file(href: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let href = href.into();
        Self {
            id: None,
            media_type: MediaType::from_href(&href),
            href,
            data: ResourceData::File { path: path.into() },
        }
    }

    /// Set the manifest identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Open the content as a byte stream
    pub fn open_content(&self) -> std::io::Result<Box<dyn Read + '_>> {
        self.data.open()
    }

    /// Read the whole content into memory
    pub fn bytes(&self) -> std::io::Result<Vec<u8>> {
        self.data.as_bytes()
    }
}

/// Resource store keyed by href
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resources {
    resources: HashMap<String, Resource>,
}

impl Resources {
    /// Create an empty resource store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under its href, returning any resource it replaced
    pub fn add(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.href.clone(), resource)
    }

    /// Get a resource by href
    pub fn get(&self, href: &str) -> Option<&Resource> {
        self.resources.get(href)
    }

    /// Remove a resource by href
    pub fn remove(&mut self, href: &str) -> Option<Resource> {
        self.resources.remove(href)
    }

    /// Check whether an href is taken
    pub fn contains(&self, href: &str) -> bool {
        self.resources.contains_key(href)
    }

    /// Iterate over all resources
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Resource)> {
        self.resources.iter()
    }

    /// All hrefs, sorted
    pub fn hrefs(&self) -> Vec<&str> {
        let mut hrefs: Vec<&str> = self.resources.keys().map(|k| k.as_str()).collect();
        hrefs.sort_unstable();
        hrefs
    }

    /// First href of the form `stem.ext`, `stem-1.ext`, ... not in the store
    ///
    /// `extension` includes the leading dot.
    pub fn unique_href(&self, stem: &str, extension: &str) -> String {
        let candidate = format!("{stem}{extension}");
        if !self.contains(&candidate) {
            return candidate;
        }
        (1..)
            .map(|n| format!("{stem}-{n}{extension}"))
            .find(|href| !self.contains(href))
            .unwrap_or_default()
    }

    /// Number of resources in the store
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_remove_leaves_other_entries() {
        let mut resources = Resources::new();
        resources.add(Resource::new("a.png", MediaType::Png, vec![1]));
        resources.add(Resource::new("b.png", MediaType::Png, vec![2]));
        resources.add(Resource::new("c.css", MediaType::Css, vec![3]));

        let removed = resources.remove("b.png").unwrap();
        assert_eq!(removed.href, "b.png");
        assert_eq!(resources.hrefs(), vec!["a.png", "c.css"]);
        assert!(resources.remove("b.png").is_none());
    }

    #[test]
    fn test_add_replaces_same_href() {
        let mut resources = Resources::new();
        assert!(resources.add(Resource::new("a.png", MediaType::Png, vec![1])).is_none());
        let old = resources.add(Resource::new("a.png", MediaType::Png, vec![2]));
        assert_eq!(old.unwrap().bytes().unwrap(), vec![1]);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn test_unique_href() {
        let mut resources = Resources::new();
        assert_eq!(resources.unique_href("cover", ".html"), "cover.html");
        resources.add(Resource::new("cover.html", MediaType::Html, vec![]));
        resources.add(Resource::new("cover-1.html", MediaType::Html, vec![]));
        assert_eq!(resources.unique_href("cover", ".html"), "cover-2.html");
    }

    #[test]
    fn test_file_backed_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"body { margin: 0; }").unwrap();

        let resource = Resource::from_file("style/main.css", file.path());
        assert_eq!(resource.media_type, MediaType::Css);

        let mut content = String::new();
        resource
            .open_content()
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "body { margin: 0; }");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let resource = Resource::from_file("gone.html", "/nonexistent/folio/gone.html");
        assert!(resource.bytes().is_err());
    }

    #[test]
    fn test_inline_serialization() {
        let resource = Resource::new("a.png", MediaType::Png, vec![0, 159, 146, 150]).with_id("img");
        let json = serde_json::to_string(&resource).unwrap();
        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(resource, back);
    }
}
