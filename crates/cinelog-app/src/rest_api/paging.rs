use cinelog_dal::{movie::MovieFilter, Batch, ListingParams};
use garde::Validate;
use serde::Serialize;

#[derive(Debug, Clone, Validate, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct MovieQuery {
    /// 1 based page number
    #[garde(range(min = 1))]
    page: Option<u32>,
    #[garde(skip)]
    genre: Option<String>,
    #[garde(skip)]
    status: Option<String>,
}

impl MovieQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn listing_params(&self, page_size: u32) -> ListingParams {
        ListingParams::for_page(self.page() as usize, page_size as usize)
    }

    pub fn into_filter(self) -> MovieFilter {
        MovieFilter {
            genre: self.genre,
            status: self.status,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    current_page: u32,
    total_pages: u64,
    total_movies: u64,
    items_per_page: u32,
    has_next: bool,
    has_prev: bool,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    #[serde(rename = "movies")]
    rows: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T>
where
    T: Serialize,
{
    pub fn from_batch(batch: Batch<T>, page: u32, page_size: u32) -> Self {
        let total = batch.total as u64;
        let total_pages = total.div_ceil(page_size.max(1) as u64);
        Self {
            rows: batch.rows,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_movies: total,
                items_per_page: page_size,
                has_next: (page as u64) < total_pages,
                has_prev: page > 1,
            },
        }
    }
}
