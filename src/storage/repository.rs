use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::{Row, Sqlite, SqlitePool};

use crate::domain::{Transaction, TransactionKind, Wallet, SINGLETON_WALLET_ID};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying the wallet and its transactions.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Wallet operations
    // ========================

    pub async fn wallet_exists(&self) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM wallet WHERE id = ?) AS present")
            .bind(SINGLETON_WALLET_ID)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check wallet existence")?;
        Ok(row.get::<i64, _>("present") != 0)
    }

    /// Insert the wallet row. Returns `false` when a wallet already exists,
    /// leaving the stored one untouched.
    pub async fn create_wallet(&self, wallet: &Wallet) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO wallet (id, balance, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(wallet.id)
        .bind(wallet.balance.to_string())
        .bind(&wallet.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create wallet")?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn get_wallet(&self) -> Result<Option<Wallet>> {
        let row = sqlx::query("SELECT id, balance, created_at FROM wallet WHERE id = ?")
            .bind(SINGLETON_WALLET_ID)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch wallet")?;

        row.as_ref().map(row_to_wallet).transpose()
    }

    // ========================
    // Transaction operations
    // ========================

    /// List all transactions in creation order.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, kind, amount, timestamp
            FROM transactions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions")?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// The `limit` most recent transactions, newest first.
    pub async fn last_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, kind, amount, timestamp
            FROM transactions
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent transactions")?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// Open an atomic write over the ledger.
    pub async fn begin(&self) -> Result<LedgerWrite> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin ledger write")?;
        Ok(LedgerWrite { tx })
    }
}

/// A pending change to the ledger. Nothing is visible to readers until
/// [`LedgerWrite::commit`]; dropping it rolls everything back.
pub struct LedgerWrite {
    tx: sqlx::Transaction<'static, Sqlite>,
}

impl LedgerWrite {
    pub async fn get_wallet(&mut self) -> Result<Option<Wallet>> {
        let row = sqlx::query("SELECT id, balance, created_at FROM wallet WHERE id = ?")
            .bind(SINGLETON_WALLET_ID)
            .fetch_optional(&mut *self.tx)
            .await
            .context("Failed to fetch wallet")?;

        row.as_ref().map(row_to_wallet).transpose()
    }

    /// Persist the wallet's updated balance.
    pub async fn save_wallet(&mut self, wallet: &Wallet) -> Result<()> {
        let result = sqlx::query("UPDATE wallet SET balance = ? WHERE id = ?")
            .bind(wallet.balance.to_string())
            .bind(wallet.id)
            .execute(&mut *self.tx)
            .await
            .context("Failed to save wallet")?;

        if result.rows_affected() != 1 {
            anyhow::bail!("Wallet {} does not exist", wallet.id);
        }
        Ok(())
    }

    /// Append a transaction to the log and assign its id.
    pub async fn append_transaction(&mut self, transaction: &mut Transaction) -> Result<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (wallet_id, kind, amount, timestamp)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(transaction.wallet_id)
        .bind(transaction.kind.as_str())
        .bind(transaction.amount.to_string())
        .bind(&transaction.timestamp)
        .fetch_one(&mut *self.tx)
        .await
        .context("Failed to append transaction")?;

        transaction.id = row.get("id");
        Ok(())
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.context("Failed to commit ledger write")
    }
}

fn row_to_wallet(row: &sqlx::sqlite::SqliteRow) -> Result<Wallet> {
    let balance_str: String = row.get("balance");

    Ok(Wallet {
        id: row.get("id"),
        balance: Decimal::from_str(&balance_str).context("Invalid wallet balance")?,
        created_at: row.get("created_at"),
    })
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
    let kind_str: String = row.get("kind");
    let amount_str: String = row.get("amount");

    Ok(Transaction {
        id: row.get("id"),
        kind: TransactionKind::from_str(&kind_str)
            .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
        amount: Decimal::from_str(&amount_str).context("Invalid transaction amount")?,
        timestamp: row.get("timestamp"),
        wallet_id: row.get("wallet_id"),
    })
}
