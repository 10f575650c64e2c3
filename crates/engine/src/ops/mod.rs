use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{ExpenseType, MoneyCents, ResultEngine, Storage, Transaction};

mod accounts;
mod transactions;

pub use accounts::AccountStore;
pub use transactions::TransactionStore;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($storage:expr, |$tx:ident| $body:expr) => {{
        let $tx = $storage.writer().begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Composes the account and transaction stores over one `Storage`.
#[derive(Clone, Debug)]
pub struct Engine {
    storage: Storage,
    accounts: AccountStore,
    transactions: TransactionStore,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    /// Logs a transaction and applies it to the account balance.
    ///
    /// Both writes share one DB transaction: if the account does not exist,
    /// or anything fails, neither the log row nor the balance change is kept.
    pub async fn record(
        &self,
        date: DateTime<Utc>,
        account_no: &str,
        expense_type: ExpenseType,
        amount: MoneyCents,
    ) -> ResultEngine<Transaction> {
        let amount = amount.ensure_non_negative()?;
        with_tx!(self.storage, |db_tx| {
            let tx = transactions::insert_transaction(
                &db_tx,
                date.date_naive(),
                account_no,
                expense_type,
                amount,
            )
            .await?;
            accounts::apply_balance(&db_tx, account_no, expense_type, amount).await?;
            Ok(tx)
        })
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass an already open storage handle
    pub fn storage(mut self, storage: Storage) -> EngineBuilder {
        self.database = storage.writer().clone();
        self
    }

    /// Pass the required database. The schema must already be in place.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let storage = Storage::from_connection(self.database);
        Engine {
            accounts: AccountStore::new(storage.clone()),
            transactions: TransactionStore::new(storage.clone()),
            storage,
        }
    }
}
