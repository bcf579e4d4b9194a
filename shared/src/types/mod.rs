//! Type definitions module
//!
//! - `pagination` - Offset pagination for list endpoints
//! - `response` - Message and health check bodies

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{HealthResponse, HealthStatus, MessageResponse};
