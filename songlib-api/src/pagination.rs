//! Pagination parameters for song listing
//!
//! `page` and `pageSize` arrive as raw query strings. Absent values take the
//! defaults; anything present must parse as a positive integer.

use thiserror::Error;

/// Page returned when `page` is absent
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `pageSize` is absent
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
}

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (1-indexed)
    pub page: i64,
    /// Rows per page, already clamped to the configured maximum
    pub page_size: i64,
    /// Rows to skip for SQL OFFSET
    pub offset: i64,
}

impl PageRequest {
    /// Parse and validate raw `page` / `pageSize` values
    ///
    /// `page_size` above `max_page_size` is clamped rather than rejected.
    ///
    /// # Examples
    /// ```
    /// use songlib_api::pagination::PageRequest;
    ///
    /// let p = PageRequest::parse(Some("3"), Some("20"), 100).unwrap();
    /// assert_eq!(p.offset, 40);
    ///
    /// let p = PageRequest::parse(None, None, 100).unwrap();
    /// assert_eq!((p.page, p.page_size, p.offset), (1, 10, 0));
    ///
    /// assert!(PageRequest::parse(Some("abc"), None, 100).is_err());
    /// ```
    pub fn parse(
        page: Option<&str>,
        page_size: Option<&str>,
        max_page_size: i64,
    ) -> Result<Self, PaginationError> {
        let page = match page {
            Some(raw) => parse_positive(raw)
                .ok_or_else(|| PaginationError::InvalidPage(raw.to_string()))?,
            None => DEFAULT_PAGE,
        };

        let requested_size = match page_size {
            Some(raw) => parse_positive(raw)
                .ok_or_else(|| PaginationError::InvalidPageSize(raw.to_string()))?,
            None => DEFAULT_PAGE_SIZE,
        };
        let page_size = requested_size.min(max_page_size.max(1));

        // Pages far enough out to overflow the offset cannot be served
        let offset = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| PaginationError::InvalidPage(page.to_string()))?;

        Ok(Self {
            page,
            page_size,
            offset,
        })
    }
}

fn parse_positive(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|v| *v >= 1)
}
