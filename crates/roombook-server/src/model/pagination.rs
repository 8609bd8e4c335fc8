use roombook_core::repository::{DEFAULT_PAGE_SIZE, PaginatedResult, Pagination};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `?currentPage=&pageSize=` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub current_page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn new(current_page: Option<u64>, page_size: Option<u64>) -> Self {
        Self {
            current_page,
            page_size,
        }
    }
}

impl TryFrom<PageQuery> for Pagination {
    type Error = ApiError;

    fn try_from(value: PageQuery) -> Result<Self, Self::Error> {
        let PageQuery {
            current_page,
            page_size,
        } = value;
        Ok(Pagination::new(
            current_page.unwrap_or(1),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T, U: Into<T>> From<PaginatedResult<U>> for PaginatedResponse<T> {
    fn from(value: PaginatedResult<U>) -> Self {
        let PaginatedResult {
            items,
            total,
            page,
            page_size,
            total_pages,
        } = value;
        Self {
            items: items.into_iter().map(Into::into).collect(),
            total_items: total,
            current_page: page,
            page_size,
            total_pages,
        }
    }
}
