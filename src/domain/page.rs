use crate::error::{PayablesError, Result};
use serde::Serialize;

/// Zero-based page index and page size of a listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(PayablesError::InvalidArgument(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of leading items to skip. Saturates, since any offset past the
    /// end yields an empty page anyway.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// An ordered slice of a filtered result set plus its totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cuts the requested window out of the full, already ordered result set.
    pub fn slice(all: Vec<T>, request: PageRequest) -> Self {
        let total_matches = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.page_size())
            .collect();
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_matches,
            total_pages: total_matches.div_ceil(request.page_size()),
        }
    }
}
