//! Shared request and response types.

pub mod dates;
mod pagination;
mod response;

pub use pagination::{PageRequest, PaginationMeta, PaginationParams};
pub use response::{Created, MessageResponse};
