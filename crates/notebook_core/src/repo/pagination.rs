//! Page-number pagination helper.
//!
//! Pure arithmetic, no storage handle involved.

/// Page size used when the caller passes zero or a negative size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound for one page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// SQL `OFFSET`/`LIMIT` pair derived from a 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Converts `(page, page_size)` into an offset/limit window.
///
/// - `page <= 0` is treated as page 1.
/// - `page_size <= 0` falls back to [`DEFAULT_PAGE_SIZE`].
/// - `page_size > MAX_PAGE_SIZE` is capped to [`MAX_PAGE_SIZE`].
pub fn paginate(page: i64, page_size: i64) -> PageWindow {
    let page = page.max(1);
    let limit = match page_size {
        size if size > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        size if size <= 0 => DEFAULT_PAGE_SIZE,
        size => size,
    };

    PageWindow {
        offset: (page - 1).saturating_mul(limit),
        limit,
    }
}
