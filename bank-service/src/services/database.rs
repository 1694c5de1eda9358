use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client as MongoClient, Collection,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::future::Future;
use std::time::Duration;

use crate::config::MongoConfig;
use crate::models::BankDetails;
use crate::services::store::{BankStore, StoreError};

/// MongoDB-backed record store. One client per process, cloned into every request.
#[derive(Clone)]
pub struct MongoBankStore {
    client: MongoClient,
    collection: Collection<BankDetails>,
    operation_timeout: Duration,
}

impl MongoBankStore {
    /// Connect and ping the deployment, all within the configured connect timeout.
    ///
    /// An unreachable store is an error here so the process never starts serving
    /// without one.
    pub async fn connect(config: &MongoConfig, app_name: &str) -> Result<Self, AppError> {
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connecting to MongoDB"
        );

        let connect = async {
            let mut client_options = ClientOptions::parse(config.uri.expose_secret())
                .await
                .map_err(|e| {
                    tracing::error!("Failed to parse MongoDB connection string: {}", e);
                    AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
                })?;
            client_options.app_name = Some(app_name.to_string());
            client_options.connect_timeout = Some(config.connect_timeout);
            client_options.server_selection_timeout = Some(config.connect_timeout);

            let client = MongoClient::with_options(client_options).map_err(|e| {
                tracing::error!("Failed to create MongoDB client: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

            client
                .database("admin")
                .run_command(doc! { "ping": 1 }, None)
                .await
                .map_err(|e| {
                    tracing::error!("MongoDB is unreachable: {}", e);
                    AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
                })?;

            Ok::<_, AppError>(client)
        };

        let client = tokio::time::timeout(config.connect_timeout, connect)
            .await
            .map_err(|_| {
                tracing::error!(
                    timeout = ?config.connect_timeout,
                    "Timed out connecting to MongoDB"
                );
                AppError::DatabaseError(anyhow::anyhow!(
                    "Timed out connecting to MongoDB after {:?}",
                    config.connect_timeout
                ))
            })??;

        let collection = client
            .database(&config.database)
            .collection::<BankDetails>(&config.collection);

        tracing::info!(database = %config.database, "Successfully connected to MongoDB database");

        Ok(Self {
            client,
            collection,
            operation_timeout: config.operation_timeout,
        })
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.operation_timeout, fut)
            .await
            .map_err(|_| {
                tracing::warn!(
                    operation,
                    timeout = ?self.operation_timeout,
                    "MongoDB operation timed out"
                );
                StoreError::Timeout(self.operation_timeout)
            })?
    }
}

#[async_trait]
impl BankStore for MongoBankStore {
    async fn insert(&self, record: &BankDetails) -> Result<ObjectId, StoreError> {
        let document = BankDetails {
            id: None,
            ..record.clone()
        };

        self.bounded("insert_one", async {
            let result = self.collection.insert_one(&document, None).await?;
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| StoreError::InvalidInsertedId(result.inserted_id.to_string()))
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<BankDetails>, StoreError> {
        self.bounded("find", async {
            let cursor = self.collection.find(doc! {}, None).await?;
            cursor.try_collect().await.map_err(StoreError::Decode)
        })
        .await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BankDetails>, StoreError> {
        self.bounded("find_one", async {
            Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
        })
        .await
    }

    async fn replace_by_id(&self, id: ObjectId, record: &BankDetails) -> Result<bool, StoreError> {
        let update = doc! {
            "$set": {
                "holder_name": record.holder_name.as_str(),
                "phone_no": record.phone_no.as_str(),
                "account_type": record.account_type.as_str(),
            }
        };

        self.bounded("update_one", async {
            let result = self
                .collection
                .update_one(doc! { "_id": id }, update, None)
                .await?;
            Ok(result.matched_count > 0)
        })
        .await
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<bool, StoreError> {
        self.bounded("delete_one", async {
            let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
            Ok(result.deleted_count > 0)
        })
        .await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.bounded("ping", async {
            self.client
                .database("admin")
                .run_command(doc! { "ping": 1 }, None)
                .await?;
            Ok(())
        })
        .await
    }
}
