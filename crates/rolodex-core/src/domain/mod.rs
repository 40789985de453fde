pub mod contact;
pub mod ids;
pub mod status;

pub use contact::{Contact, ContactInput};
pub use ids::ContactId;
pub use status::{ContactStatus, StatusFilter};
