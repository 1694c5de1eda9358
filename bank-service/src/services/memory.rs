use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::BankDetails;
use crate::services::store::{BankStore, StoreError};

/// Process-local record store for running without MongoDB and for tests.
///
/// Identifiers are minted as `ObjectId`s, so ids look the same on the wire as
/// with the MongoDB store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryBankStore {
    records: RwLock<BTreeMap<ObjectId, BankDetails>>,
}

impl InMemoryBankStore {
    pub fn new() -> Self {
        tracing::debug!("Using in-memory bank store");
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl BankStore for InMemoryBankStore {
    async fn insert(&self, record: &BankDetails) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let stored = BankDetails {
            id: Some(id),
            ..record.clone()
        };
        self.records.write().await.insert(id, stored);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<BankDetails>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BankDetails>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn replace_by_id(&self, id: ObjectId, record: &BankDetails) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(existing) => {
                existing.holder_name = record.holder_name.clone();
                existing.phone_no = record.phone_no.clone();
                existing.account_type = record.account_type.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
