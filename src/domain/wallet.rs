use std::fmt;

use rust_decimal::Decimal;

use super::{now_timestamp, Amount, TransactionKind};

pub type WalletId = i64;

/// There is exactly one wallet per deployment; it always lives in this row.
pub const SINGLETON_WALLET_ID: WalletId = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub id: WalletId,
    /// Never negative
    pub balance: Amount,
    pub created_at: String,
}

impl Wallet {
    pub fn new() -> Self {
        Self {
            id: SINGLETON_WALLET_ID,
            balance: Decimal::ZERO,
            created_at: now_timestamp(),
        }
    }

    /// Balance the wallet would hold after applying a transaction of `kind`.
    pub fn balance_after(&self, kind: TransactionKind, amount: Amount) -> Result<Amount, BalanceError> {
        let next = self
            .balance
            .checked_add(kind.signed(amount))
            .ok_or(BalanceError::Overflow)?;

        if next < Decimal::ZERO {
            return Err(BalanceError::Overdraft);
        }
        Ok(next)
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceError {
    /// The balance would drop below zero
    Overdraft,
    /// The balance no longer fits in a decimal
    Overflow,
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceError::Overdraft => write!(f, "balance would become negative"),
            BalanceError::Overflow => write!(f, "balance overflow"),
        }
    }
}

impl std::error::Error for BalanceError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet_with(balance: i64) -> Wallet {
        Wallet {
            balance: Decimal::new(balance, 0),
            ..Wallet::new()
        }
    }

    #[test]
    fn test_new_wallet_is_empty_singleton() {
        let wallet = Wallet::new();
        assert_eq!(wallet.id, SINGLETON_WALLET_ID);
        assert_eq!(wallet.balance, Decimal::ZERO);
    }

    #[test]
    fn test_deposit_increases_balance() {
        let wallet = wallet_with(10);
        let next = wallet.balance_after(TransactionKind::Deposit, Decimal::new(5, 0));
        assert_eq!(next, Ok(Decimal::new(15, 0)));
    }

    #[test]
    fn test_withdrawal_down_to_zero_is_allowed() {
        let wallet = wallet_with(10);
        let next = wallet.balance_after(TransactionKind::Withdrawal, Decimal::new(10, 0));
        assert_eq!(next, Ok(Decimal::ZERO));
    }

    #[test]
    fn test_withdrawal_below_zero_is_overdraft() {
        let wallet = wallet_with(10);
        let next = wallet.balance_after(TransactionKind::Withdrawal, Decimal::new(1001, 2));
        assert_eq!(next, Err(BalanceError::Overdraft));
    }

    #[test]
    fn test_overflow_is_reported() {
        let wallet = Wallet {
            balance: Decimal::MAX,
            ..Wallet::new()
        };
        let next = wallet.balance_after(TransactionKind::Deposit, Decimal::ONE);
        assert_eq!(next, Err(BalanceError::Overflow));
    }
}
