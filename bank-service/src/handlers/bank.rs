//! Bank record CRUD handlers.
//!
//! Each handler validates its input before touching the store, makes exactly
//! one store call and converts the outcome straight into a response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::{
    dtos::{
        BankDetailsPayload, BankDetailsResponse, BankMutationResponse, MessageResponse,
        MSG_CREATED, MSG_DELETED, MSG_UPDATED,
    },
    services::{metrics::record_operation, StoreError},
    utils::{parse_object_id, JsonBody},
    AppState,
};

const MSG_NOT_FOUND: &str = "Bank details not found";

fn not_found(operation: &'static str, id: ObjectId) -> AppError {
    tracing::info!(bank_id = %id, operation, "Bank details not found");
    record_operation(operation, "not_found");
    AppError::NotFound(anyhow::anyhow!(MSG_NOT_FOUND))
}

fn store_failure(operation: &'static str, err: StoreError, message: &'static str) -> AppError {
    tracing::error!(error = %err, operation, "Bank store operation failed");
    record_operation(operation, "error");
    AppError::DatabaseError(anyhow::anyhow!(message))
}

fn parse_id(operation: &'static str, raw: &str) -> Result<ObjectId, AppError> {
    parse_object_id(raw).inspect_err(|_| record_operation(operation, "invalid"))
}

fn parse_body(
    operation: &'static str,
    body: Result<JsonBody<BankDetailsPayload>, AppError>,
) -> Result<BankDetailsPayload, AppError> {
    body.map(|JsonBody(payload)| payload)
        .inspect_err(|_| record_operation(operation, "invalid"))
}

/// `POST /bank`
pub async fn create_bank_details(
    State(state): State<AppState>,
    body: Result<JsonBody<BankDetailsPayload>, AppError>,
) -> Result<(StatusCode, Json<BankMutationResponse>), AppError> {
    let payload = parse_body("create", body)?;
    let record = payload.into_record();

    tracing::info!("Creating bank details");

    let id = state.store.insert(&record).await.map_err(|e| match e {
        StoreError::InvalidInsertedId(_) => {
            store_failure("create", e, "Failed to parse inserted ID")
        }
        other => store_failure("create", other, "Failed to create bank details"),
    })?;

    tracing::info!(bank_id = %id, "Bank details created");
    record_operation("create", "ok");

    Ok((
        StatusCode::CREATED,
        Json(BankMutationResponse {
            message: MSG_CREATED.to_string(),
            bank: BankDetailsResponse::from(record.with_id(id)),
        }),
    ))
}

/// `GET /bank`
pub async fn list_bank_details(
    State(state): State<AppState>,
) -> Result<Json<Vec<BankDetailsResponse>>, AppError> {
    let records = state.store.find_all().await.map_err(|e| match e {
        StoreError::Decode(_) => store_failure("list", e, "Failed to parse bank details"),
        other => store_failure("list", other, "Failed to fetch bank details"),
    })?;

    tracing::debug!(count = records.len(), "Listed bank details");
    record_operation("list", "ok");

    Ok(Json(
        records.into_iter().map(BankDetailsResponse::from).collect(),
    ))
}

/// `GET /bank/:id`
pub async fn get_bank_details(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<BankDetailsResponse>, AppError> {
    let id = parse_id("get", &raw_id)?;

    let record = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| store_failure("get", e, "Failed to fetch bank details"))?
        .ok_or_else(|| not_found("get", id))?;

    record_operation("get", "ok");
    Ok(Json(BankDetailsResponse::from(record)))
}

/// `PUT /bank/:id`
///
/// Replaces every non-id field; fields missing from the body are stored as
/// empty strings. The response echoes the submitted record under the path id
/// rather than re-reading the store.
pub async fn update_bank_details(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<JsonBody<BankDetailsPayload>, AppError>,
) -> Result<Json<BankMutationResponse>, AppError> {
    let id = parse_id("update", &raw_id)?;
    let record = parse_body("update", body)?.into_record();

    tracing::info!(bank_id = %id, "Updating bank details");

    let matched = state
        .store
        .replace_by_id(id, &record)
        .await
        .map_err(|e| store_failure("update", e, "Failed to update bank details"))?;

    if !matched {
        return Err(not_found("update", id));
    }

    record_operation("update", "ok");
    Ok(Json(BankMutationResponse {
        message: MSG_UPDATED.to_string(),
        bank: BankDetailsResponse::from(record.with_id(id)),
    }))
}

/// `DELETE /bank/:id`
pub async fn delete_bank_details(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id("delete", &raw_id)?;

    tracing::info!(bank_id = %id, "Deleting bank details");

    let deleted = state
        .store
        .delete_by_id(id)
        .await
        .map_err(|e| store_failure("delete", e, "Failed to delete bank details"))?;

    if !deleted {
        return Err(not_found("delete", id));
    }

    record_operation("delete", "ok");
    Ok(Json(MessageResponse {
        message: MSG_DELETED.to_string(),
    }))
}
