use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use cinelog_dal::input::ValidationErrors;
use http::StatusCode;
use serde_json::json;
use tracing::{debug, error};

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(ValidationErrors),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Movie not found: {0}")]
    MovieNotFound(String),
    #[error("Resource not found")]
    ResourceNotFound,
    #[error("Data already exists")]
    AlreadyInitialized,
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<cinelog_dal::Error> for ApiError {
    fn from(error: cinelog_dal::Error) -> Self {
        match error {
            cinelog_dal::Error::InvalidInput(errors) => ApiError::InvalidRequest(errors),
            cinelog_dal::Error::RecordNotFound(what) => ApiError::MovieNotFound(what),
            cinelog_dal::Error::AlreadyInitialized => ApiError::AlreadyInitialized,
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(ValidationErrors::new(vec![rejection.body_text()]))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

/// Path parameters are only numeric ids, anything else is unknown resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Path not matched: {rejection}");
        ApiError::ResourceNotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({"errors": errors}))).into_response()
            }
            ApiError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({"errors": [msg]}))).into_response()
            }
            ApiError::MovieNotFound(what) => {
                debug!("Not found: {what}");
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "Movie not found"})),
                )
                    .into_response()
            }
            ApiError::ResourceNotFound => not_found_response(),
            ApiError::AlreadyInitialized => (
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Data already exists"})),
            )
                .into_response(),
            ApiError::InternalError(msg) => {
                error!("Internal error: {msg}");
                internal_error_response()
            }
        }
    }
}

pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Resource not found"})),
    )
        .into_response()
}

pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error"})),
    )
        .into_response()
}
