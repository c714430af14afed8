use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Position of a page inside the full, counted result set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    /// 1-based.
    pub current_page: u64,
    pub per_page: u64,
    /// Number of rows across all pages.
    pub total: u64,
    /// Last 1-based page number; 1 for an empty result set.
    pub last_page: u64,
}

impl PageInfo {
    pub fn new(current_page: u64, per_page: u64, total: u64) -> Self {
        let last_page = if per_page == 0 {
            1
        } else {
            total.div_ceil(per_page).max(1)
        };
        Self {
            current_page,
            per_page,
            total,
            last_page,
        }
    }
}

/// A length-aware page of items.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Map items while keeping `page_info` (domain → DTO).
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}
