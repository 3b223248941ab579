use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::listing::ListingError;
use crate::repository::errors::RepositoryError;

/// Errors returned by the service layer to the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Record not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("Upload failed: {0}")]
    Upload(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl ServiceError {
    /// Whether the storage backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ServiceError::Listing(ListingError::ListingQueryFailed(
                RepositoryError::ConnectionError(_)
            )) | ServiceError::Repository(RepositoryError::ConnectionError(_))
        )
    }
}
