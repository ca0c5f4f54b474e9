use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Query-string pagination parameters shared by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

impl PaginationParams {
    /// Clamp page and size into their valid ranges. Out-of-range values
    /// are corrected rather than rejected.
    pub fn normalized(&self) -> Self {
        let page = if self.page < 1 { 1 } else { self.page };
        let size = if self.size < 1 {
            DEFAULT_PAGE_SIZE
        } else if self.size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            self.size
        };
        Self {
            page,
            size,
            search: self.search.clone(),
        }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub metadata: PageMetadata,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_count: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + params.size - 1) / params.size
        };
        Self {
            data,
            metadata: PageMetadata {
                current_page: params.page,
                page_size: params.size,
                total_count,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let params = PaginationParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.size, DEFAULT_PAGE_SIZE);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn zero_and_negative_values_are_clamped() {
        let params = PaginationParams {
            page: 0,
            size: -5,
            search: String::new(),
        }
        .normalized();
        assert_eq!(params.page, 1);
        assert_eq!(params.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn oversized_page_is_capped() {
        let params = PaginationParams {
            page: 2,
            size: 5000,
            search: String::new(),
        }
        .normalized();
        assert_eq!(params.size, MAX_PAGE_SIZE);
        assert_eq!(params.offset(), MAX_PAGE_SIZE);
    }

    #[test]
    fn envelope_computes_total_pages() {
        let params = PaginationParams {
            page: 1,
            size: 50,
            search: String::new(),
        };
        let page = Paginated::new(vec![1, 2, 3], &params, 101);
        assert_eq!(page.metadata.total_pages, 3);
        assert_eq!(page.metadata.total_count, 101);

        let empty: Paginated<i32> = Paginated::new(vec![], &params, 0);
        assert_eq!(empty.metadata.total_pages, 0);
    }
}
