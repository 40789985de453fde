pub mod confirm;
pub mod domain;
pub mod error;
pub mod filter;
pub mod rules;
pub mod time;

pub use confirm::ConfirmOutcome;
pub use domain::*;
pub use error::CoreError;
pub use filter::visible_contacts;
pub use rules::*;
