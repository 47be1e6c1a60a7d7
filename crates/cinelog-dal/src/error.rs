use crate::input::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    StoreError(#[from] cinelog_store::StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Data already exists")]
    AlreadyInitialized,

    #[error("Timestamp format error: {0}")]
    TimestampError(#[from] time::error::Format),
}
