pub mod error;
mod http;

pub use error::{ApiError, Result};
pub use http::HttpCollection;

use rolodex_core::domain::{Contact, ContactId, ContactInput};

/// The remote collection resource: one set of records addressable as a whole
/// or individually by id. All operations are fallible and none retry.
pub trait ContactCollection {
    /// Fetches the full collection. No pagination.
    fn list_all(&self) -> Result<Vec<Contact>>;

    /// Fetches a single record; `ApiError::NotFound` when absent.
    fn get_one(&self, id: ContactId) -> Result<Contact>;

    /// Stamps a fresh id and timestamps on the client, submits the full
    /// record, and returns the stored representation.
    fn create(&self, input: ContactInput) -> Result<Contact>;

    /// Fetch-merge-replace: the backing store replaces whole records, so the
    /// current remote copy is re-read and the input merged over it before
    /// the PUT.
    fn update(&self, id: ContactId, input: ContactInput) -> Result<Contact>;

    /// Removes the record. Deleting an id that is already gone surfaces the
    /// failure to the caller.
    fn delete(&self, id: ContactId) -> Result<()>;
}
