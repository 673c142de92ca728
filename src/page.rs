use crate::error::NavError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Opaque handle for an element of the hosting page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

/// A navigable anchor on the results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Handle the page environment uses to address this element
    pub id: ElementId,

    /// Absolute target URL
    pub href: String,

    /// Visible anchor text (may be empty)
    #[serde(default)]
    pub text: String,
}

impl Link {
    /// Create a new link
    pub fn new(id: ElementId, href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Result-view categories offered as tabs above the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Images,
    Videos,
    Maps,
    News,
    Shopping,
}

impl Category {
    /// Every category, in tab-bar order
    pub const ALL: [Category; 6] = [
        Category::All,
        Category::Images,
        Category::Videos,
        Category::Maps,
        Category::News,
        Category::Shopping,
    ];

    /// Lowercase name used in config and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Images => "images",
            Category::Videos => "videos",
            Category::Maps => "maps",
            Category::News => "news",
            Category::Shopping => "shopping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Read-only snapshot of one results page's navigable elements.
///
/// The link list is fixed at construction and never re-queried; a new page
/// means a new `PageModel`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    links: Vec<Link>,
    tabs: HashMap<Category, Link>,
    next_page: Option<Link>,
    prev_page: Option<Link>,
}

impl PageModel {
    /// Create a snapshot from result links in document order
    pub fn new(links: Vec<Link>) -> Self {
        Self {
            links,
            ..Self::default()
        }
    }

    /// Attach the anchor for a category tab
    pub fn with_tab(mut self, category: Category, anchor: Link) -> Self {
        self.tabs.insert(category, anchor);
        self
    }

    /// Attach the "next page" pagination anchor
    pub fn with_next_page(mut self, anchor: Link) -> Self {
        self.next_page = Some(anchor);
        self
    }

    /// Attach the "previous page" pagination anchor
    pub fn with_prev_page(mut self, anchor: Link) -> Self {
        self.prev_page = Some(anchor);
        self
    }

    /// Number of navigable result links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Result link at `index`, or `OutOfRange`
    pub fn link_at(&self, index: usize) -> Result<&Link, NavError> {
        self.links.get(index).ok_or(NavError::OutOfRange {
            index,
            len: self.links.len(),
        })
    }

    /// All result links, in document order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Anchor to the next results page, absent on the last page
    pub fn next_page_anchor(&self) -> Option<&Link> {
        self.next_page.as_ref()
    }

    /// Anchor to the previous results page, absent on the first page
    pub fn prev_page_anchor(&self) -> Option<&Link> {
        self.prev_page.as_ref()
    }

    /// Anchor of a category tab, if the page offers that category
    pub fn tab_anchor(&self, category: Category) -> Option<&Link> {
        self.tabs.get(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(i: usize) -> Link {
        Link::new(ElementId(i), format!("https://example.com/{}", i), "")
    }

    #[test]
    fn test_link_lookup() {
        let page = PageModel::new((0..3).map(link).collect());
        assert_eq!(page.link_count(), 3);
        assert_eq!(page.link_at(2).unwrap().href, "https://example.com/2");
        assert_eq!(
            page.link_at(3),
            Err(NavError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_empty_page() {
        let page = PageModel::default();
        assert_eq!(page.link_count(), 0);
        assert!(page.link_at(0).is_err());
        assert!(page.next_page_anchor().is_none());
        assert!(page.prev_page_anchor().is_none());
        for category in Category::ALL {
            assert!(page.tab_anchor(category).is_none());
        }
    }

    #[test]
    fn test_optional_anchors() {
        let page = PageModel::new(vec![link(0)])
            .with_tab(Category::News, link(10))
            .with_next_page(link(11));

        assert_eq!(page.tab_anchor(Category::News), Some(&link(10)));
        assert!(page.tab_anchor(Category::Images).is_none());
        assert_eq!(page.next_page_anchor(), Some(&link(11)));
        assert!(page.prev_page_anchor().is_none());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("images".parse::<Category>(), Ok(Category::Images));
        assert_eq!(" Shopping ".parse::<Category>(), Ok(Category::Shopping));
        assert!("books".parse::<Category>().is_err());
        assert_eq!(Category::Maps.to_string(), "maps");
    }
}
