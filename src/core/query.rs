//! List queries and pagination metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel facet value meaning "no constraint"
pub const FACET_ALL: &str = "all";

/// Direction bound to a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A facet selection
///
/// Deserializes from a JSON string, boolean or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Facet {
    /// Boolean flag; only `true` constrains
    Flag(bool),

    /// Exact (case-insensitive) match, or membership for list fields
    Text(String),

    /// Inactive facet
    Any,
}

impl Facet {
    pub fn text(value: impl Into<String>) -> Self {
        Facet::Text(value.into())
    }

    /// Whether this facet constrains the result at all.
    ///
    /// `Any`, `Flag(false)`, empty text and the `"all"` sentinel are inactive.
    pub fn is_active(&self) -> bool {
        match self {
            Facet::Flag(flag) => *flag,
            Facet::Text(value) => {
                let value = value.trim();
                !value.is_empty() && !value.eq_ignore_ascii_case(FACET_ALL)
            }
            Facet::Any => false,
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        Facet::Text(value.to_string())
    }
}

impl From<bool> for Facet {
    fn from(value: bool) -> Self {
        Facet::Flag(value)
    }
}

impl<T: Into<Facet>> From<Option<T>> for Facet {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Facet::Any)
    }
}

/// Query for one run of the list pipeline
///
/// A fresh query is built on every interaction; nothing carries over
/// between runs.
///
/// # Example
/// ```rust,ignore
/// let query = ListQuery::new()
///     .with_search("gpt")
///     .with_facet("category", "research")
///     .with_sort("views")
///     .with_page(2, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Case-insensitive substring; blank disables the search stage
    pub search: String,

    /// Facet selections, ANDed together
    pub facets: IndexMap<String, Facet>,

    /// Sort key name; direction is fixed by the key
    pub sort: Option<String>,

    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            facets: IndexMap::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_facet(mut self, name: impl Into<String>, facet: impl Into<Facet>) -> Self {
        self.facets.insert(name.into(), facet.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get page size, ensuring minimum of 1
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Search text if the search stage is active
    pub fn search_text(&self) -> Option<&str> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    /// Facets that actually constrain the result
    pub fn active_facets(&self) -> impl Iterator<Item = (&str, &Facet)> {
        self.facets
            .iter()
            .filter(|(_, facet)| facet.is_active())
            .map(|(name, facet)| (name.as_str(), facet))
    }
}

/// One page of pipeline output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Items on this page, in sorted order
    pub items: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> ListPage<T> {
    /// Total number of items after search and facets
    pub fn total_count(&self) -> usize {
        self.pagination.total_count
    }

    /// Total number of pages (never less than 1)
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

impl<T: Clone> ListPage<&T> {
    /// Clone the borrowed items into an owned page
    pub fn cloned(self) -> ListPage<T> {
        self.map(Clone::clone)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total_count: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, page_size: usize, total_count: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_count, page_size);

        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// `max(1, ceil(total_count / page_size))`
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1)).max(1)
}
