use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated page request; both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Result<Self> {
        if page == 0 {
            return Err(Error::Validation("page must be at least 1".to_string()));
        }
        if per_page == 0 {
            return Err(Error::Validation("per_page must be at least 1".to_string()));
        }
        Ok(Self { page, per_page })
    }

    /// Fill in omitted values: page 1, `default_per_page` items.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Result<Self> {
        Self::new(page.unwrap_or(1), per_page.unwrap_or(default_per_page))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }
}

/// One page of results plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            total_pages: total_pages(total, request.per_page()),
        }
    }
}

/// `ceil(total / per_page)`
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(per_page.max(1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero() {
        assert!(matches!(PageRequest::new(0, 5), Err(Error::Validation(_))));
        assert!(matches!(PageRequest::new(1, 0), Err(Error::Validation(_))));
    }

    #[test]
    fn test_defaults_and_offset() {
        let req = PageRequest::from_query(None, None, 10).unwrap();
        assert_eq!((req.page(), req.per_page(), req.offset()), (1, 10, 0));

        let req = PageRequest::from_query(Some(3), Some(5), 10).unwrap();
        assert_eq!(req.offset(), 10);
        assert_eq!(req.limit(), 5);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(1, 10), 1);
    }
}
