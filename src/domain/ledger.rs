use rust_decimal::Decimal;

use super::{format_amount, Amount, Transaction, Wallet};

/// Compute the balance implied by a transaction log.
/// Balance = sum of deposits - sum of withdrawals
pub fn compute_balance(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .fold(Decimal::ZERO, |balance, tx| balance + tx.signed_amount())
}

/// Result of comparing the stored wallet against its transaction log.
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub wallet_exists: bool,
    pub stored_balance: Option<Amount>,
    pub computed_balance: Amount,
    pub transaction_count: usize,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn build_integrity_report(wallet: Option<&Wallet>, transactions: &[Transaction]) -> IntegrityReport {
    let computed_balance = compute_balance(transactions);
    let mut issues = Vec::new();

    match wallet {
        Some(wallet) => {
            if wallet.balance != computed_balance {
                issues.push(format!(
                    "Stored balance {} does not match transaction log ({})",
                    format_amount(wallet.balance),
                    format_amount(computed_balance)
                ));
            }
            if wallet.balance < Decimal::ZERO {
                issues.push(format!("Negative balance: {}", format_amount(wallet.balance)));
            }
        }
        None if !transactions.is_empty() => {
            issues.push(format!("{} transaction(s) without a wallet", transactions.len()));
        }
        None => {}
    }

    let invalid_amounts = transactions
        .iter()
        .filter(|tx| tx.amount <= Decimal::ZERO)
        .count();
    if invalid_amounts > 0 {
        issues.push(format!("{} transaction(s) with non-positive amount", invalid_amounts));
    }

    if transactions.windows(2).any(|pair| pair[0].id >= pair[1].id) {
        issues.push("Transaction ids are not strictly increasing".to_string());
    }

    // Replaying the log must never dip below zero either
    let mut running = Decimal::ZERO;
    for tx in transactions {
        running += tx.signed_amount();
        if running < Decimal::ZERO {
            issues.push(format!("Balance goes negative at transaction {}", tx.id));
            break;
        }
    }

    IntegrityReport {
        wallet_exists: wallet.is_some(),
        stored_balance: wallet.map(|w| w.balance),
        computed_balance,
        transaction_count: transactions.len(),
        issues,
    }
}
