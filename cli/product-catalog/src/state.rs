//! Page and filter state of the product list.

use std::num::NonZeroU32;

use crate::types::{FIRST_PAGE, FilterCriteria, FilterField, PageNumber};

/// What the product list currently shows.
///
/// Any change here is followed by a new [`query_page`] for the current page
/// and filter.
///
/// [`query_page`]: crate::ClientTrait::query_page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListState {
    page: PageNumber,
    total_pages: u32,
    filter: FilterCriteria,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            total_pages: 1,
            filter: FilterCriteria::default(),
        }
    }
}

impl ProductListState {
    pub fn new(page: PageNumber, filter: FilterCriteria) -> Self {
        Self {
            page,
            filter,
            ..Self::default()
        }
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Change one filter input, which starts over at the first page.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filter.set(field, value);
        self.page = FIRST_PAGE;
    }

    /// Store a freshly counted number of pages.
    ///
    /// The current page is moved back if it no longer exists.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        if self.page.get() > self.total_pages {
            self.page = NonZeroU32::new(self.total_pages).unwrap_or(FIRST_PAGE);
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.get() < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > FIRST_PAGE
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page = self.page.saturating_add(1);
        }
    }

    pub fn prev_page(&mut self) {
        self.page = NonZeroU32::new(self.page.get() - 1).unwrap_or(FIRST_PAGE);
    }
}
