//! Route handlers
//!
//! - `users`: registration, sessions, password reset, accounts, payments
//! - `courses`: catalogue, course management, chapter viewing
//! - `health`: liveness

pub mod courses;
pub mod health;
pub mod users;

use std::str::FromStr;

use lg_core::errors::ValidationError;

/// Parse an optional enum-like field; blank values count as absent
pub(crate) fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(T::from_str)
        .transpose()
}
