use thiserror::Error;

use crate::domain::Amount;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User already has a wallet")]
    WalletAlreadyExists,

    #[error("Wallet Not Exist")]
    WalletNotFound,

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Withdrawal amount cannot exceed {balance}")]
    InsufficientFunds { balance: Amount, requested: Amount },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures caused by the caller rather than by the service.
    pub fn is_domain(&self) -> bool {
        !matches!(self, AppError::Database(_))
    }
}
