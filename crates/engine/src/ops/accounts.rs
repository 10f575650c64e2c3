use sea_orm::{
    ConnectionTrait, Order, QueryFilter, QueryOrder, QuerySelect,
    prelude::*,
    sea_query::{Expr, SimpleExpr},
};

use crate::{Account, EngineError, ExpenseType, MoneyCents, ResultEngine, Storage, accounts};

/// Storage order of the `account` table.
fn rowid() -> SimpleExpr {
    Expr::cust("rowid")
}

/// Adds or subtracts `amount` in a single `UPDATE`, so concurrent updates of
/// the same account cannot lose each other. `amount` must be non-negative.
///
/// The `WHERE` clause bounds the current balance so the result stays within
/// `i64`; SQLite would otherwise store an overflowed sum as REAL.
pub(crate) async fn apply_balance<C: ConnectionTrait>(
    conn: &C,
    account_no: &str,
    expense_type: ExpenseType,
    amount: MoneyCents,
) -> ResultEngine<()> {
    let cents = amount.cents();
    let balance = Expr::col(accounts::Column::Balance);
    let (new_balance, in_range) = match expense_type {
        ExpenseType::Expense => (
            balance.sub(cents),
            accounts::Column::Balance.gte(i64::MIN + cents),
        ),
        ExpenseType::Income => (
            balance.add(cents),
            accounts::Column::Balance.lte(i64::MAX - cents),
        ),
    };

    let result = accounts::Entity::update_many()
        .col_expr(accounts::Column::Balance, new_balance)
        .filter(accounts::Column::AccountNo.eq(account_no))
        .filter(in_range)
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        let exists = accounts::Entity::find_by_id(account_no.to_string())
            .one(conn)
            .await?
            .is_some();
        return Err(if exists {
            EngineError::InvalidAmount(format!(
                "{} of {amount} would overflow the balance of {account_no}",
                expense_type.as_str().to_lowercase()
            ))
        } else {
            EngineError::AccountNotFound(account_no.to_string())
        });
    }

    tracing::debug!(
        account_no,
        kind = expense_type.as_str(),
        amount = %amount,
        "balance updated"
    );
    Ok(())
}

/// CRUD over the `account` table.
#[derive(Clone, Debug)]
pub struct AccountStore {
    storage: Storage,
}

impl AccountStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Every account number, in storage order. Empty when there are none.
    pub async fn list_account_numbers(&self) -> ResultEngine<Vec<String>> {
        let numbers = accounts::Entity::find()
            .select_only()
            .column(accounts::Column::AccountNo)
            .order_by(rowid(), Order::Asc)
            .into_tuple::<String>()
            .all(self.storage.reader())
            .await?;
        Ok(numbers)
    }

    /// Every account, in storage order.
    pub async fn list_accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by(rowid(), Order::Asc)
            .all(self.storage.reader())
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    pub async fn get_account(&self, account_no: &str) -> ResultEngine<Account> {
        accounts::Entity::find_by_id(account_no.to_string())
            .one(self.storage.reader())
            .await?
            .map(Account::from)
            .ok_or_else(|| EngineError::AccountNotFound(account_no.to_string()))
    }

    /// Inserts a new account. A duplicate account number surfaces as the
    /// database's uniqueness error.
    pub async fn add_account(&self, account: &Account) -> ResultEngine<()> {
        accounts::ActiveModel::from(account)
            .insert(self.storage.writer())
            .await?;
        tracing::debug!(account_no = %account.account_no, "account added");
        Ok(())
    }

    /// Deletes the account and, through the foreign key, its transactions.
    pub async fn remove_account(&self, account_no: &str) -> ResultEngine<()> {
        let result = accounts::Entity::delete_by_id(account_no.to_string())
            .exec(self.storage.writer())
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::AccountNotFound(account_no.to_string()));
        }
        tracing::debug!(account_no, "account removed");
        Ok(())
    }

    /// `balance - amount` for an expense, `balance + amount` for an income.
    pub async fn update_balance(
        &self,
        account_no: &str,
        expense_type: ExpenseType,
        amount: MoneyCents,
    ) -> ResultEngine<()> {
        let amount = amount.ensure_non_negative()?;
        apply_balance(self.storage.writer(), account_no, expense_type, amount).await
    }
}
