//! Page cursor and page-number window for server-paginated screens.

use crate::framework::Page;

/// Maximum number of page links shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Up to [`PAGE_WINDOW`] zero-based page indices centred on `current`, clamped to
/// `0..total_pages`.
pub fn page_numbers(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    let window = PAGE_WINDOW.min(total_pages);
    let current = current.min(total_pages - 1);
    let mut start = current.saturating_sub(PAGE_WINDOW / 2);
    if start + window > total_pages {
        start = total_pages - window;
    }
    (start..start + window).collect()
}

/// Position within a paginated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub current: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl PageCursor {
    pub fn new(size: u32) -> Self {
        Self {
            current: 0,
            size,
            total_pages: 0,
            total_elements: 0,
        }
    }

    /// Whether `page` is inside `[0, total_pages)`.
    pub fn contains(&self, page: i64) -> bool {
        page >= 0 && page < i64::from(self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total_pages
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        page_numbers(self.current, self.total_pages)
    }

    /// Takes the totals of a freshly loaded page.
    pub fn absorb<T>(&mut self, page: &Page<T>) {
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
        self.current = page.number;
    }
}
