pub mod error;
pub mod input;
pub mod movie;
pub mod stats;

pub use cinelog_store::{CollectionStore, JsonFileStore, MemoryStore};
pub use error::Error;

pub const MAX_LIMIT: usize = 1000;
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct ListingParams {
    pub offset: usize,
    pub limit: usize,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingParams {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// `page` is 1 based, page 0 is treated as first page
    pub fn for_page(page: usize, page_size: usize) -> Self {
        let limit = page_size.clamp(1, MAX_LIMIT);
        Self::new(page.saturating_sub(1).saturating_mul(limit), limit)
    }
}

/// One slice of a (filtered) listing together with the total count of matching records
#[derive(Debug, Clone)]
pub struct Batch<T> {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub rows: Vec<T>,
}

impl<T> Batch<T> {
    pub fn from_rows(rows: Vec<T>, params: &ListingParams) -> Self {
        let total = rows.len();
        let rows = rows
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .collect();
        Batch {
            offset: params.offset,
            limit: params.limit,
            total,
            rows,
        }
    }
}
