//! Pagination types for the catalog listing.

use serde::Serialize;

use crate::config::{CATALOG_PAGE_SIZE, DEFAULT_PAGE_NUMBER};

/// Requested page (1-indexed, fixed page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub per_page: u64,
}

impl PaginationParams {
    /// Catalog page `page`; zero is treated as the first page
    pub fn page(page: u64) -> Self {
        Self {
            page: page.max(DEFAULT_PAGE_NUMBER),
            per_page: CATALOG_PAGE_SIZE,
        }
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::page(DEFAULT_PAGE_NUMBER)
    }
}

/// One page of results with its position in the whole listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(params: PaginationParams, total: u64) -> Self {
        let total_pages = if params.per_page > 0 {
            total.div_ceil(params.per_page)
        } else {
            0
        };

        Self {
            page: params.page,
            per_page: params.per_page,
            total,
            total_pages,
        }
    }

    /// Whether the requested page lies beyond the last one
    pub fn is_past_end(&self) -> bool {
        self.page > self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }

    /// A page with no rows
    pub fn empty(meta: PaginationMeta) -> Self {
        Self::new(Vec::new(), meta)
    }
}
