use rolodex_core::domain::ContactId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("contact not found: {0}")]
    NotFound(ContactId),
}

pub type Result<T> = std::result::Result<T, ApiError>;
