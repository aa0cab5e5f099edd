use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    build_integrity_report, format_amount, now_timestamp, Amount, BalanceError, IntegrityReport,
    Transaction, TransactionKind, Wallet,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing the ledger operations.
/// This is the primary interface for any client (HTTP, CLI).
pub struct LedgerService {
    repo: Repository,
    /// Serializes every read-modify-write of the balance
    write_lock: Mutex<()>,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Open (creating if needed) and migrate the database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Wallet operations
    // ========================

    pub async fn has_wallet(&self) -> Result<bool, AppError> {
        Ok(self.repo.wallet_exists().await?)
    }

    /// Create the wallet with a zero balance. Fails if one already exists.
    pub async fn create_wallet(&self) -> Result<Wallet, AppError> {
        let _guard = self.write_lock.lock().await;
        let wallet = Wallet::new();
        if !self.repo.create_wallet(&wallet).await? {
            warn!("Rejected wallet creation: wallet already exists");
            return Err(AppError::WalletAlreadyExists);
        }

        info!(wallet_id = wallet.id, "Wallet created");
        Ok(wallet)
    }

    pub async fn get_balance(&self) -> Result<Amount, AppError> {
        let wallet = self.repo.get_wallet().await?.ok_or(AppError::WalletNotFound)?;
        Ok(wallet.balance)
    }

    // ========================
    // Transaction operations
    // ========================

    pub async fn deposit(&self, amount: Amount) -> Result<Transaction, AppError> {
        self.record_transaction(TransactionKind::Deposit, amount).await
    }

    pub async fn withdraw(&self, amount: Amount) -> Result<Transaction, AppError> {
        self.record_transaction(TransactionKind::Withdrawal, amount).await
    }

    /// Apply a deposit or withdrawal to the wallet.
    ///
    /// The balance update and the appended transaction are committed together;
    /// a rejected or failed call leaves both untouched.
    pub async fn record_transaction(
        &self,
        kind: TransactionKind,
        amount: Amount,
    ) -> Result<Transaction, AppError> {
        if amount <= Decimal::ZERO {
            warn!(%kind, amount = %amount, "Rejected non-positive amount");
            return Err(AppError::InvalidAmount(
                "Please enter a positive amount".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut write = self.repo.begin().await?;

        let mut wallet = write.get_wallet().await?.ok_or(AppError::WalletNotFound)?;

        let new_balance = wallet.balance_after(kind, amount).map_err(|e| match e {
            BalanceError::Overdraft => {
                warn!(
                    balance = %wallet.balance,
                    requested = %amount,
                    "Rejected withdrawal: insufficient funds"
                );
                AppError::InsufficientFunds {
                    balance: wallet.balance,
                    requested: amount,
                }
            }
            BalanceError::Overflow => {
                AppError::InvalidAmount(format!("Amount {} is too large", format_amount(amount)))
            }
        })?;

        let mut transaction = Transaction::new(wallet.id, kind, amount, now_timestamp());
        write.append_transaction(&mut transaction).await?;

        wallet.balance = new_balance;
        write.save_wallet(&wallet).await?;
        write.commit().await?;

        info!(
            transaction_id = transaction.id,
            %kind,
            amount = %amount,
            balance = %new_balance,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    /// The `n` most recent transactions, newest first.
    /// Non-positive `n` yields an empty list.
    pub async fn get_last_n_transactions(&self, n: i64) -> Result<Vec<Transaction>, AppError> {
        if !self.repo.wallet_exists().await? {
            return Err(AppError::WalletNotFound);
        }
        if n <= 0 {
            return Ok(Vec::new());
        }

        let transactions = self.repo.last_transactions(n).await?;
        debug!(requested = n, returned = transactions.len(), "Fetched history");
        Ok(transactions)
    }

    // ========================
    // Integrity operations
    // ========================

    /// Check that the stored balance agrees with the transaction log.
    pub async fn check_integrity(&self) -> Result<IntegrityReport, AppError> {
        // Hold the write lock so the balance and the log come from the same state
        let _guard = self.write_lock.lock().await;
        let wallet = self.repo.get_wallet().await?;
        let transactions = self.repo.list_transactions().await?;

        Ok(build_integrity_report(wallet.as_ref(), &transactions))
    }
}
