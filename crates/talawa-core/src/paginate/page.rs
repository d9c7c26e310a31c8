//! Fetched pages and page requests.

use serde::{Deserialize, Serialize};

use crate::types::Cursor;

/// Parameters for fetching one page of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return.
    pub first: u32,
    /// Return items after this cursor; `None` requests the first page.
    pub after: Option<Cursor>,
}

impl PageRequest {
    /// Request the first page.
    pub fn first(first: u32) -> Self {
        Self { first, after: None }
    }

    /// Request the page following `cursor`.
    pub fn after(first: u32, cursor: Cursor) -> Self {
        Self {
            first,
            after: Some(cursor),
        }
    }
}

/// One page of a paginated connection, as returned by a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,

    /// Continuation token for the next page, if the backend returned one.
    pub end_cursor: Option<Cursor>,

    /// Whether the backend reports further pages.
    pub has_next_page: bool,

    /// Size of the whole connection, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Create a page without a total count.
    pub fn new(items: Vec<T>, end_cursor: Option<Cursor>, has_next_page: bool) -> Self {
        Self {
            items,
            end_cursor,
            has_next_page,
            total_count: None,
        }
    }

    /// A terminal page with no items.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None, false)
    }

    /// Attach the connection's total count.
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
