//! Common types used across the service

use serde::{Deserialize, Serialize};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

/// Query-string pagination parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

/// Slice `items` into the requested page
pub fn paginate<T: Clone>(items: &[T], query: &PageQuery) -> Page<T> {
    let total = items.len() as u64;
    let page = query.page.max(1);
    let page_size = query.page_size;
    let start = ((page - 1) as usize).saturating_mul(page_size as usize);
    let slice = if start >= items.len() {
        &[]
    } else {
        let end = (start + page_size as usize).min(items.len());
        &items[start..end]
    };
    Page {
        items: slice.to_vec(),
        page,
        page_size,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, page_size: u32) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn first_page_holds_page_size_items() {
        let data: Vec<i32> = (0..120).collect();
        let page = paginate(&data, &query(1, 50));
        assert_eq!(page.items.len(), 50);
        assert_eq!(page.items[0], 0);
        assert_eq!(page.total, 120);
    }

    #[test]
    fn last_page_is_short() {
        let data: Vec<i32> = (0..120).collect();
        let page = paginate(&data, &query(3, 50));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0], 100);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let data: Vec<i32> = (0..10).collect();
        let page = paginate(&data, &query(5, 50));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 10);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let data: Vec<i32> = (0..10).collect();
        let page = paginate(&data, &query(0, 4));
        assert_eq!(page.items, vec![0, 1, 2, 3]);
        assert_eq!(page.page, 1);
    }
}
