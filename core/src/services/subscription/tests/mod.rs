//! Tests for subscription service
