//! Inputs accepted by the authentication service

use crate::domain::entities::user::{Stream, Track};

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub fresh_or_remedial: Option<Track>,
    pub natural_or_social: Option<Stream>,
}
