//! Data transfer objects for the Agora Web API.

mod request;
mod response;
mod validation;

pub use request::*;
pub use response::*;
pub use validation::{no_control_chars, not_empty_trimmed, ValidatedJson};
