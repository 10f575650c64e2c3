//! The module contains the `Account` struct and its `account` table mapping.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::MoneyCents;

/// An account.
///
/// A named monetary balance, identified by its account number. The balance
/// has no lower bound and may go negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Unique and immutable once the account is stored.
    pub account_no: String,
    pub bank_name: String,
    pub account_holder_name: String,
    pub balance: MoneyCents,
}

impl Account {
    pub fn new(
        account_no: impl Into<String>,
        bank_name: impl Into<String>,
        account_holder_name: impl Into<String>,
        balance: MoneyCents,
    ) -> Self {
        Self {
            account_no: account_no.into(),
            bank_name: bank_name.into(),
            account_holder_name: account_holder_name.into(),
            balance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "accountNo")]
    pub account_no: String,
    #[sea_orm(column_name = "bankName")]
    pub bank_name: String,
    #[sea_orm(column_name = "accountHolderName")]
    pub account_holder_name: String,
    pub balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(value: &Account) -> Self {
        Self {
            account_no: ActiveValue::Set(value.account_no.clone()),
            bank_name: ActiveValue::Set(value.bank_name.clone()),
            account_holder_name: ActiveValue::Set(value.account_holder_name.clone()),
            balance: ActiveValue::Set(value.balance.cents()),
        }
    }
}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            account_no: model.account_no,
            bank_name: model.bank_name,
            account_holder_name: model.account_holder_name,
            balance: MoneyCents::new(model.balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trip_keeps_every_field() {
        let account = Account::new("A1", "BankX", "Alice", MoneyCents::new(10_000));
        let active: ActiveModel = (&account).into();

        let model = Model {
            account_no: active.account_no.unwrap(),
            bank_name: active.bank_name.unwrap(),
            account_holder_name: active.account_holder_name.unwrap(),
            balance: active.balance.unwrap(),
        };
        assert_eq!(model.balance, 10_000);
        assert_eq!(Account::from(model), account);
    }
}
