pub mod collection;
pub mod movie;
mod paging;

pub use paging::{MovieQuery, Page, Pagination};

use axum::Router;

use crate::state::AppState;

/// All API routes, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/movies", movie::router())
        .merge(collection::router())
}
