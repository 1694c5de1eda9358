#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use bank_service::{
    build_router,
    config::BankConfig,
    models::BankDetails,
    services::{BankStore, InMemoryBankStore, StoreError},
    AppState,
};
use mongodb::bson::{self, doc, oid::ObjectId};
use serde_json::Value;
use service_core::config::Config;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

/// Configuration for in-process tests: random port, in-memory store, default CORS.
pub fn test_config() -> BankConfig {
    BankConfig::from_lookup(Config { port: 0 }, |key| match key {
        "BANK_STORE" => Some("memory".to_string()),
        "SERVICE_NAME" => Some("bank-service-test".to_string()),
        _ => None,
    })
    .expect("Failed to build test configuration")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router driven in-process with `oneshot`; no socket involved.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn with_store(store: Arc<dyn BankStore>) -> Self {
        let router = build_router(AppState::new(store, test_config()))
            .expect("Failed to build test router");
        Self { router }
    }

    pub fn in_memory() -> (Self, Arc<InMemoryBankStore>) {
        let store = Arc::new(InMemoryBankStore::new());
        (Self::with_store(store.clone()), store)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a raw body with a JSON content type.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &'static str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Create a record and return its identifier.
    pub async fn create(&self, body: Value) -> String {
        let response = self.request(Method::POST, "/bank", Some(body)).await;
        assert_eq!(response.status, StatusCode::CREATED, "create failed: {}", response.body);
        response.body["bank"]["id"]
            .as_str()
            .expect("created record has an id")
            .to_string()
    }
}

/// Store whose every call fails, counting how often it was reached.
#[derive(Default)]
pub struct FailingStore {
    calls: AtomicUsize,
    invalid_inserted_id: bool,
    undecodable_records: bool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts "succeed" but hand back an identifier that is not an ObjectId.
    pub fn with_invalid_inserted_id() -> Self {
        Self {
            invalid_inserted_id: true,
            ..Self::default()
        }
    }

    /// Listing reaches the store but a stored document does not decode.
    pub fn with_undecodable_records() -> Self {
        Self {
            undecodable_records: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> StoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StoreError::Timeout(Duration::from_secs(5))
    }
}

#[async_trait]
impl BankStore for FailingStore {
    async fn insert(&self, _record: &BankDetails) -> Result<ObjectId, StoreError> {
        if self.invalid_inserted_id {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(StoreError::InvalidInsertedId("\"not-an-object-id\"".to_string()));
        }
        Err(self.fail())
    }

    async fn find_all(&self) -> Result<Vec<BankDetails>, StoreError> {
        if self.undecodable_records {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let decode_error = bson::from_document::<BankDetails>(doc! { "holder_name": 42 })
                .expect_err("numeric holder_name must not decode");
            return Err(StoreError::Decode(mongodb::error::Error::from(decode_error)));
        }
        Err(self.fail())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<BankDetails>, StoreError> {
        Err(self.fail())
    }

    async fn replace_by_id(&self, _id: ObjectId, _record: &BankDetails) -> Result<bool, StoreError> {
        Err(self.fail())
    }

    async fn delete_by_id(&self, _id: ObjectId) -> Result<bool, StoreError> {
        Err(self.fail())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(self.fail())
    }
}
