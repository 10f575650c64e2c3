//! Initial schema: accounts and their transaction log.
//!
//! - `account`: one row per account, balance kept in cents
//! - `transactionLog`: append-only income/expense events, removed together
//!   with their account

use sea_orm_migration::prelude::*;

use crate::idens::{Account, TransactionLog};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::AccountNo)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Account::BankName).string().not_null())
                    .col(
                        ColumnDef::new(Account::AccountHolderName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Account::Balance).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionLog::TransactionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransactionLog::Date).string().not_null())
                    .col(
                        ColumnDef::new(TransactionLog::ExpenseType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionLog::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionLog::AccountNo)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactionLog-accountNo")
                            .from(TransactionLog::Table, TransactionLog::AccountNo)
                            .to(Account::Table, Account::AccountNo)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(TransactionLog::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).if_exists().to_owned())
            .await
    }
}
