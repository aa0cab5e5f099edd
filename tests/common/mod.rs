// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wallet_ledger::application::LedgerService;
use wallet_ledger::server::create_router;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to create a router backed by a temporary database
pub async fn test_router() -> Result<(Router, Arc<LedgerService>, TempDir)> {
    let (service, temp_dir) = test_service().await?;
    let service = Arc::new(service);
    Ok((create_router(service.clone()), service, temp_dir))
}

/// Send a GET request and return the raw body text
pub async fn get_text(app: &Router, uri: &str) -> Result<(StatusCode, String)> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

/// Send a GET request and decode the JSON body
pub async fn get_json(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let (status, text) = get_text(app, uri).await?;
    Ok((status, serde_json::from_str(&text)?))
}

/// Read a JSON number back as an exact decimal
pub fn json_decimal(value: &Value) -> Decimal {
    assert!(value.is_number(), "expected a JSON number, got {}", value);
    Decimal::from_str(&value.to_string()).unwrap()
}

/// Helper to build a decimal from a literal string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}
