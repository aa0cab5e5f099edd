use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Amount, WalletId};

pub type TransactionId = i64;

/// Format used for every timestamp the ledger records or reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(TransactionKind::Deposit),
            "withdrawal" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }

    /// Signed effect of `amount` on the wallet balance.
    pub fn signed(&self, amount: Amount) -> Amount {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of one balance change. Transactions are only ever
/// appended; the wallet owns them and they keep a plain id back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monotonic, assigned by the repository on append
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive, the sign comes from `kind`
    pub amount: Amount,
    pub timestamp: String,
    #[serde(skip)]
    pub wallet_id: WalletId,
}

impl Transaction {
    /// Create a new transaction. The id must be assigned by the repository.
    pub fn new(wallet_id: WalletId, kind: TransactionKind, amount: Amount, timestamp: String) -> Self {
        assert!(amount > Decimal::ZERO, "Transaction amount must be positive");
        Self {
            id: 0, // Will be set by repository
            kind,
            amount,
            timestamp,
            wallet_id,
        }
    }

    pub fn signed_amount(&self) -> Amount {
        self.kind.signed(self.amount)
    }
}
