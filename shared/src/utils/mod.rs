//! Utility functions module

pub mod validation;
