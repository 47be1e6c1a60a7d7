use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing, Json, Router,
};
#[cfg(feature = "openapi")]
use cinelog_dal::movie::Movie;
use cinelog_dal::{input::MovieInput, movie::MovieRepository};
use http::StatusCode;
use serde_json::json;
use tracing::info;

use crate::{
    error::ApiResult,
    extract::{AppJson, AppPath},
    repository_from_request,
    rest_api::{MovieQuery, Page},
    state::AppState,
    validate::Garde,
};

repository_from_request!(MovieRepository);

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Movie", operation_id = "listMovies",
    params(MovieQuery), responses((status = StatusCode::OK, description = "List of movies paginated", body = Page<Movie>))))]
pub async fn list(
    repository: MovieRepository,
    State(state): State<AppState>,
    Garde(Query(query)): Garde<Query<MovieQuery>>,
) -> ApiResult<impl IntoResponse> {
    let page_size = state.config().default_page_size;
    let page = query.page();
    let listing_params = query.listing_params(page_size);
    let batch = repository.list(listing_params, query.into_filter()).await;
    Ok((StatusCode::OK, Json(Page::from_batch(batch, page, page_size))))
}

#[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Movie", operation_id = "getMovie",
    params(("id" = i64, Path, description = "Movie id")),
    responses((status = StatusCode::OK, description = "Movie", body = Movie),
    (status = StatusCode::NOT_FOUND, description = "Movie not found"))))]
pub async fn get(
    AppPath(id): AppPath<i64>,
    repository: MovieRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Movie", operation_id = "createMovie",
    request_body = MovieInput,
    responses((status = StatusCode::CREATED, description = "Created movie", body = Movie),
    (status = StatusCode::BAD_REQUEST, description = "Validation errors"))))]
pub async fn create(
    repository: MovieRepository,
    AppJson(payload): AppJson<MovieInput>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload).await?;
    info!("Added movie {} ({})", record.title, record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(put, path = "/{id}", tag = "Movie", operation_id = "updateMovie",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MovieInput,
    responses((status = StatusCode::OK, description = "Updated movie", body = Movie),
    (status = StatusCode::BAD_REQUEST, description = "Validation errors"),
    (status = StatusCode::NOT_FOUND, description = "Movie not found"))))]
pub async fn update(
    AppPath(id): AppPath<i64>,
    repository: MovieRepository,
    AppJson(payload): AppJson<MovieInput>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(id, payload).await?;
    Ok((StatusCode::OK, Json(record)))
}

#[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Movie", operation_id = "deleteMovie",
    params(("id" = i64, Path, description = "Movie id")),
    responses((status = StatusCode::OK, description = "Movie deleted"),
    (status = StatusCode::NOT_FOUND, description = "Movie not found"))))]
pub async fn delete(
    AppPath(id): AppPath<i64>,
    repository: MovieRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(id).await?;
    info!("Deleted movie {id}");
    Ok((
        StatusCode::OK,
        Json(json!({"message": "Movie deleted successfully"})),
    ))
}

#[cfg(feature = "openapi")]
#[derive(utoipa::OpenApi)]
#[openapi(paths(list, get, create, update, delete))]
struct ApiDocs;

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;
    ApiDocs::openapi()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", routing::get(list).post(create))
        .route("/{id}", routing::get(get).put(update).delete(delete))
}
