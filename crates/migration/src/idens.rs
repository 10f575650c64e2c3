//! Table and column identifiers of the ledger database.
//!
//! The string form of every variant is the exact name used in SQL, so the
//! camel-cased names of the on-disk schema are spelled out explicitly.

use sea_orm_migration::prelude::*;

/// The `account` table.
#[derive(Iden, Clone, Copy, Debug)]
pub enum Account {
    Table,
    #[iden = "accountNo"]
    AccountNo,
    #[iden = "bankName"]
    BankName,
    #[iden = "accountHolderName"]
    AccountHolderName,
    /// Balance in integer cents.
    Balance,
}

/// The `transactionLog` table.
#[derive(Iden, Clone, Copy, Debug)]
pub enum TransactionLog {
    #[iden = "transactionLog"]
    Table,
    #[iden = "transactionId"]
    TransactionId,
    /// `dd-MM-yyyy` text.
    Date,
    /// `EXPENSE` or `INCOME`.
    #[iden = "expenseType"]
    ExpenseType,
    /// Amount in integer cents.
    Amount,
    #[iden = "accountNo"]
    AccountNo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_match_sql_names() {
        assert_eq!(Account::Table.to_string(), "account");
        assert_eq!(Account::AccountNo.to_string(), "accountNo");
        assert_eq!(Account::AccountHolderName.to_string(), "accountHolderName");
        assert_eq!(TransactionLog::Table.to_string(), "transactionLog");
        assert_eq!(TransactionLog::TransactionId.to_string(), "transactionId");
        assert_eq!(TransactionLog::ExpenseType.to_string(), "expenseType");
    }
}
