pub mod error;

pub use error::{handle_domain_error, parse_id, resource_not_found, validate, ApiError, ApiResult};
