use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::application::{AppError, LedgerService};
use crate::domain::{parse_amount, Amount, Transaction};

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService>,
}

pub fn create_router(ledger: Arc<LedgerService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/user/wallet", get(create_wallet))
        .route("/user/balance", get(balance))
        .route("/user/deposit/:amount", get(deposit))
        .route("/user/withdrawal/:amount", get(withdrawal))
        .route("/user/history/:n", get(history))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { ledger })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn create_wallet(State(s): State<AppState>) -> Result<Json<Value>, AppError> {
    s.ledger.create_wallet().await?;
    Ok(Json(json!({"response": "Wallet successfully created!"})))
}

async fn balance(State(s): State<AppState>) -> Result<Json<Value>, AppError> {
    let balance = s.ledger.get_balance().await?;
    Ok(Json(json!({"account balance": balance})))
}

async fn deposit(
    State(s): State<AppState>,
    Path(amount): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let amount = amount_from_path(&amount)?;
    Ok(Json(s.ledger.deposit(amount).await?))
}

async fn withdrawal(
    State(s): State<AppState>,
    Path(amount): Path<String>,
) -> Result<Json<Transaction>, AppError> {
    let amount = amount_from_path(&amount)?;
    Ok(Json(s.ledger.withdraw(amount).await?))
}

async fn history(
    State(s): State<AppState>,
    Path(n): Path<String>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let n: i64 = n
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("'{}' is not a valid transaction count", n)))?;
    Ok(Json(s.ledger.get_last_n_transactions(n).await?))
}

fn amount_from_path(raw: &str) -> Result<Amount, AppError> {
    parse_amount(raw).map_err(|_| AppError::InvalidAmount(format!("'{}' is not a valid amount", raw)))
}
