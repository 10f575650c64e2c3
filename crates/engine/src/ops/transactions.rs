use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};

use crate::{
    EngineError, ExpenseType, MoneyCents, ResultEngine, Storage, Transaction, accounts,
    transactions,
};

use super::with_tx;

async fn require_account<C: ConnectionTrait>(conn: &C, account_no: &str) -> ResultEngine<()> {
    accounts::Entity::find_by_id(account_no.to_string())
        .one(conn)
        .await?
        .map(|_| ())
        .ok_or_else(|| EngineError::AccountNotFound(account_no.to_string()))
}

fn hydrate(models: Vec<transactions::Model>) -> ResultEngine<Vec<Transaction>> {
    models.into_iter().map(Transaction::try_from).collect()
}

/// Checks the account and appends one row to the log.
pub(crate) async fn insert_transaction<C: ConnectionTrait>(
    conn: &C,
    date: NaiveDate,
    account_no: &str,
    expense_type: ExpenseType,
    amount: MoneyCents,
) -> ResultEngine<Transaction> {
    require_account(conn, account_no).await?;

    let model = transactions::ActiveModel::new_row(date, account_no, expense_type, amount)
        .insert(conn)
        .await?;
    tracing::debug!(
        transaction_id = model.transaction_id,
        account_no,
        kind = expense_type.as_str(),
        amount = %amount,
        "transaction logged"
    );
    Transaction::try_from(model)
}

/// Append-only log over the `transactionLog` table.
#[derive(Clone, Debug)]
pub struct TransactionStore {
    storage: Storage,
}

impl TransactionStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Appends a transaction. Only the calendar day of `date` is kept.
    ///
    /// The account balance is left untouched; see `Engine::record` for the
    /// combined operation.
    pub async fn log_transaction(
        &self,
        date: DateTime<Utc>,
        account_no: &str,
        expense_type: ExpenseType,
        amount: MoneyCents,
    ) -> ResultEngine<Transaction> {
        let amount = amount.ensure_non_negative()?;
        with_tx!(self.storage, |db_tx| {
            insert_transaction(&db_tx, date.date_naive(), account_no, expense_type, amount).await
        })
    }

    /// Every transaction, oldest first.
    pub async fn list_all_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::TransactionId)
            .all(self.storage.reader())
            .await?;
        hydrate(models)
    }

    /// The `limit` most recent transactions, oldest first.
    pub async fn list_recent_transactions(&self, limit: u64) -> ResultEngine<Vec<Transaction>> {
        // SQLite binds LIMIT as a signed 64-bit integer.
        let limit = limit.min(i64::MAX.unsigned_abs());
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::TransactionId)
            .limit(limit)
            .all(self.storage.reader())
            .await?;
        let mut recent = hydrate(models)?;
        recent.reverse();
        Ok(recent)
    }

    /// Transactions of one account, oldest first.
    pub async fn list_account_transactions(
        &self,
        account_no: &str,
    ) -> ResultEngine<Vec<Transaction>> {
        let reader = self.storage.reader();
        require_account(reader, account_no).await?;

        let models = transactions::Entity::find()
            .filter(transactions::Column::AccountNo.eq(account_no))
            .order_by_asc(transactions::Column::TransactionId)
            .all(reader)
            .await?;
        hydrate(models)
    }
}
