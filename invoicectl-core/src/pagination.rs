//! Pagination math for the invoices table

/// Rows per page of the invoices table
pub const ITEMS_PER_PAGE: u32 = 6;

/// A 1-indexed page of `ITEMS_PER_PAGE` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Rows per page
    pub per_page: u32,
}

impl Pagination {
    /// Page of the invoices table. Page is clamped to a minimum of 1.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: ITEMS_PER_PAGE,
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Number of pages needed for `count` rows: `ceil(count / ITEMS_PER_PAGE)`.
///
/// Zero rows means zero pages.
pub fn total_pages(count: u64) -> u32 {
    count.div_ceil(ITEMS_PER_PAGE as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1).offset(), 0);
        assert_eq!(Pagination::new(2).offset(), 6);
        assert_eq!(Pagination::new(5).offset(), 24);
    }

    #[test]
    fn clamps_page() {
        let p = Pagination::new(0);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn total_pages_boundaries() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(6), 1);
        assert_eq!(total_pages(7), 2);
        assert_eq!(total_pages(12), 2);
        assert_eq!(total_pages(13), 3);
    }
}
