//! Page requests and page results
//!
//! A [`PageRequest`] can only be built through [`PageRequest::of`], so a
//! zero or oversized page never reaches a repository.

use serde::Serialize;

use crate::error::{BeerError, BeerResult};

pub const DEFAULT_PAGE_NUMBER: u64 = 0;
pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const MAX_PAGE_SIZE: u64 = 1000;

// Postgres binds LIMIT/OFFSET as BIGINT
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Which slice of an ordered result set to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

impl PageRequest {
    /// Build a request for the zero-based `page_number`.
    ///
    /// Fails with [`BeerError::Validation`] when `page_size` is zero or
    /// above [`MAX_PAGE_SIZE`].
    pub fn of(page_number: u64, page_size: u64) -> BeerResult<Self> {
        if page_size == 0 {
            return Err(BeerError::Validation(
                "Page size must be greater than zero".to_string(),
            ));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(BeerError::Validation(format!(
                "Page size must not exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        self.page_number
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of repository results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: PageRequest,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            pageable,
            total_elements,
        }
    }

    /// Cut the requested page out of an already ordered, fully materialized list
    pub fn slice(items: Vec<T>, pageable: PageRequest) -> Self {
        let total_elements = items.len() as u64;
        let offset = usize::try_from(pageable.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pageable.page_size()).unwrap_or(usize::MAX);

        let content = items.into_iter().skip(offset).take(limit).collect();
        Self::new(content, pageable, total_elements)
    }
}
