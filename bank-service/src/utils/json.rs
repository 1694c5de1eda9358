use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body extractor whose every rejection is a 400 with an `{"error"}` body.
///
/// The body is decoded as JSON whatever `Content-Type` the client sent.
/// Syntax errors and type mismatches never surface as axum's default 415/422.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Failed to read request body");
            AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e))
        })?;

        Ok(JsonBody(value))
    }
}
