//! Transaction primitives.
//!
//! A `Transaction` is an immutable record of one income or expense event on
//! an account. Rows live in the `transactionLog` table.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine};

/// Text form of `date` in the `transactionLog` table (`dd-MM-yyyy`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpenseType {
    Expense,
    Income,
}

impl ExpenseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }
}

impl TryFrom<&str> for ExpenseType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "EXPENSE" => Ok(Self::Expense),
            "INCOME" => Ok(Self::Income),
            other => Err(EngineError::DataCorruption(format!(
                "invalid expense type: {other}"
            ))),
        }
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| EngineError::DataCorruption(format!("invalid date \"{value}\": {err}")))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Assigned by the store, increasing with insertion order.
    pub transaction_id: i64,
    pub date: NaiveDate,
    pub account_no: String,
    pub expense_type: ExpenseType,
    pub amount: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactionLog")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "transactionId")]
    pub transaction_id: i64,
    pub date: String,
    #[sea_orm(column_name = "expenseType")]
    pub expense_type: String,
    pub amount: i64,
    #[sea_orm(column_name = "accountNo")]
    pub account_no: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountNo",
        to = "super::accounts::Column::AccountNo",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A new row; `transactionId` is left to the database.
    pub(crate) fn new_row(
        date: NaiveDate,
        account_no: &str,
        expense_type: ExpenseType,
        amount: MoneyCents,
    ) -> Self {
        Self {
            transaction_id: ActiveValue::NotSet,
            date: ActiveValue::Set(format_date(date)),
            expense_type: ActiveValue::Set(expense_type.as_str().to_string()),
            amount: ActiveValue::Set(amount.cents()),
            account_no: ActiveValue::Set(account_no.to_string()),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_id: model.transaction_id,
            date: parse_date(&model.date)?,
            account_no: model.account_no,
            expense_type: ExpenseType::try_from(model.expense_type.as_str())?,
            amount: MoneyCents::new(model.amount),
        })
    }
}
