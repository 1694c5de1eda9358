//! Storage seam for bank records.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::time::Duration;
use thiserror::Error;

use crate::models::BankDetails;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation failed: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to decode stored record: {0}")]
    Decode(#[source] mongodb::error::Error),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store returned a non-ObjectId identifier: {0}")]
    InvalidInsertedId(String),
}

/// Document store holding bank records.
///
/// Implementations are shared across requests behind an `Arc` and must be
/// safe for concurrent use. Every method is a single round-trip; nothing is
/// cached between calls.
#[async_trait]
pub trait BankStore: Send + Sync {
    /// Insert a new record and return the identifier the store assigned.
    /// Any `id` already set on `record` is ignored.
    async fn insert(&self, record: &BankDetails) -> Result<ObjectId, StoreError>;

    /// Every record, in store order. Empty when the collection is empty.
    async fn find_all(&self) -> Result<Vec<BankDetails>, StoreError>;

    /// `Ok(None)` means the identifier matched nothing.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BankDetails>, StoreError>;

    /// Overwrite every non-id field of the matching record.
    /// Returns `false` when no record matched.
    async fn replace_by_id(&self, id: ObjectId, record: &BankDetails) -> Result<bool, StoreError>;

    /// Returns `false` when no record matched.
    async fn delete_by_id(&self, id: ObjectId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
