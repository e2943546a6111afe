//! Custom request extractors.

mod query;
mod validated_json;

pub use query::QueryParams;
pub use validated_json::{JsonBody, ValidatedJson};

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Parse a path segment as an id, naming the entity in the error.
pub fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(format!("Invalid {} ID format", entity)))
}
