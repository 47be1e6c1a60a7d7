use axum::{response::IntoResponse, routing::{get, post}, Json, Router};
use cinelog_dal::{
    movie::{Movie, MovieRepository},
    stats::CollectionStats,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{error::ApiResult, extract::AppJson, state::AppState};

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/stats", tag = "Collection", operation_id = "collectionStats",
    responses((status = StatusCode::OK, description = "Collection statistics", body = CollectionStats))))]
pub async fn stats(repository: MovieRepository) -> ApiResult<impl IntoResponse> {
    let stats: CollectionStats = repository.stats().await;
    Ok((StatusCode::OK, Json(stats)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/genres", tag = "Collection", operation_id = "listGenres",
    responses((status = StatusCode::OK, description = "Distinct genres, sorted", body = Vec<String>))))]
pub async fn genres(repository: MovieRepository) -> ApiResult<impl IntoResponse> {
    let genres = repository.genres().await;
    Ok((StatusCode::OK, Json(genres)))
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InitRequest {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "/init", tag = "Collection", operation_id = "initCollection",
    request_body = InitRequest,
    responses((status = StatusCode::CREATED, description = "Collection initialized"),
    (status = StatusCode::BAD_REQUEST, description = "Data already exists"))))]
pub async fn init(
    repository: MovieRepository,
    AppJson(payload): AppJson<InitRequest>,
) -> ApiResult<impl IntoResponse> {
    let count = repository.init(payload.movies).await?;
    info!("Collection initialized with {count} movies");
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": format!("Initialized with {count} movies")})),
    ))
}

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(stats, genres, init))]
struct ApiDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ApiDocs::openapi()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/genres", get(genres))
        .route("/init", post(init))
}
