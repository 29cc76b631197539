//! Pagination types
//!
//! Defines the page descriptor shared by the fetcher and the aggregator.

use serde::{Deserialize, Serialize};

/// One server-returned chunk of a list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// 1-based index of this page
    pub page_number: u32,
    /// Number of pages of the whole listing
    pub total_pages: u32,
    /// Number of results of the whole listing
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, page_number: u32, total_pages: u32, total_results: u64) -> Self {
        Self {
            items,
            page_number,
            total_pages,
            total_results,
        }
    }

    /// A single page holding every result
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let pages = u32::from(total > 0);
        Self::new(items, 1, pages, total)
    }

    /// An empty listing
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 0, 0)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if a page follows this one
    pub fn has_more(&self) -> bool {
        self.total_results > 0 && self.page_number < self.total_pages
    }

    /// Number of the following page, if any
    pub fn next_page_number(&self) -> Option<u32> {
        self.has_more().then(|| self.page_number + 1)
    }
}
