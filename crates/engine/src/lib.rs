//! Persistence for accounts and their income/expense log.
//!
//! A [`Storage`] owns the SQLite connection. [`AccountStore`] and
//! [`TransactionStore`] run statements against it, and [`Engine`] composes
//! both:
//!
//! ```no_run
//! use chrono::Utc;
//! use engine::{Account, Engine, ExpenseType, MoneyCents, Storage};
//!
//! # async fn run() -> Result<(), engine::EngineError> {
//! let engine = Engine::builder().storage(Storage::in_memory().await?).build();
//! engine
//!     .accounts()
//!     .add_account(&Account::new("A1", "BankX", "Alice", MoneyCents::new(100_00)))
//!     .await?;
//! engine
//!     .record(Utc::now(), "A1", ExpenseType::Expense, MoneyCents::new(30_00))
//!     .await?;
//! assert_eq!(engine.accounts().get_account("A1").await?.balance, MoneyCents::new(70_00));
//! # Ok(())
//! # }
//! ```

pub use accounts::Account;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{AccountStore, Engine, EngineBuilder, TransactionStore};
pub use storage::{SchemaPolicy, SchemaStatus, Storage};
pub use transactions::{DATE_FORMAT, ExpenseType, Transaction};

mod accounts;
mod error;
mod money;
mod ops;
mod storage;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
