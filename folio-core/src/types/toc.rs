//! Table of contents types

use serde::{Deserialize, Serialize};

/// A single entry in the table of contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Display title, may be blank until filled in from the content
    pub title: String,

    /// Href of the resource this entry points at
    pub href: Option<String>,

    /// Child entries for nested TOC
    pub children: Vec<Section>,
}

impl Section {
    /// Create a new TOC entry
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: Some(href.into()),
            children: Vec::new(),
        }
    }

    /// An entry that groups children without pointing at content
    pub fn heading(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: None,
            children: Vec::new(),
        }
    }

    /// Add a single child entry, returning it for further nesting
    pub fn add_child(&mut self, child: Section) -> &mut Section {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Whether the title still needs filling in
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// This entry and all descendants, pre-order
    pub fn iter(&self) -> SectionIter<'_> {
        SectionIter { stack: vec![self] }
    }
}

/// Pre-order walk over a TOC tree
pub struct SectionIter<'a> {
    stack: Vec<&'a Section>,
}

impl<'a> SectionIter<'a> {
    pub(crate) fn over(sections: &'a [Section]) -> Self {
        Self {
            stack: sections.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.stack.pop()?;
        self.stack.extend(section.children.iter().rev());
        Some(section)
    }
}
