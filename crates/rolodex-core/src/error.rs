use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid status: {0} (expected 'active' or 'inactive')")]
    InvalidStatus(String),
    #[error("invalid status filter: {0} (expected 'all', 'active' or 'inactive')")]
    InvalidStatusFilter(String),
}
