//! Pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 20;

/// Clamped pagination parameters (1-indexed pages)
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Build pagination, clamping page to >= 1 and per_page to 1..=100.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL OFFSET for the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// SQL LIMIT.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Map items into another representation, keeping page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.total <= 0 {
            1
        } else {
            let per_page = u64::from(self.per_page);
            (self.total as u64 + per_page - 1) / per_page
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Raw query-string parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_math() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(4, 20).offset(), 60);
    }

    #[test]
    fn clamping() {
        let p = Pagination::new(0, 0);
        assert_eq!((p.page, p.per_page), (1, 1));

        let p = Pagination::new(1, 500);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 41,
            page: 1,
            per_page: 20,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn total_pages_survives_huge_totals() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: i64::from(u32::MAX) + 1,
            page: 1,
            per_page: 1,
        };
        assert_eq!(page.total_pages(), 4_294_967_296);
        assert!(page.has_next());
    }

    #[test]
    fn empty_result_is_one_page() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 20,
        };
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Paginated {
            items: vec![1, 2, 3],
            total: 3,
            page: 1,
            per_page: 20,
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
    }
}
