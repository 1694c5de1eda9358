pub mod json;

pub use json::JsonBody;

use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

pub const MSG_INVALID_ID: &str = "Invalid ID format";

/// Parse a path identifier before any store access.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| {
        tracing::debug!(bank_id = %raw, "Rejected malformed identifier");
        AppError::BadRequest(anyhow::anyhow!(MSG_INVALID_ID))
    })
}
