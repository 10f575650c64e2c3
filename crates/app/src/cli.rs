use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Account, Engine, ExpenseType, MoneyCents, Transaction};

use crate::{error::Result, settings::DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "expense_ledger")]
#[command(about = "Accounts and their income/expense log")]
pub struct Cli {
    /// Settings file (TOML). Missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Database connection string, overrides the settings file.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Account(AccountCommand),
    #[command(subcommand)]
    Tx(TxCommand),
    #[command(subcommand)]
    Schema(SchemaCommand),
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    List,
    Show { account_no: String },
    Add(AccountAddArgs),
    Remove { account_no: String },
}

#[derive(Args, Debug)]
pub struct AccountAddArgs {
    account_no: String,
    bank_name: String,
    account_holder_name: String,
    #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
    balance: MoneyCents,
}

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// Log a transaction and apply it to the account balance.
    Log(TxLogArgs),
    List {
        /// Only the N most recent transactions.
        #[arg(long)]
        limit: Option<u64>,
    },
}

#[derive(Args, Debug)]
pub struct TxLogArgs {
    account_no: String,
    kind: Kind,
    #[arg(value_parser = parse_amount)]
    amount: MoneyCents,
    /// `dd-MM-yyyy`, defaults to today.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommand {
    Status,
    /// Drop and recreate both tables. Every account and transaction is lost.
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Expense,
    Income,
}

impl From<Kind> for ExpenseType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => ExpenseType::Expense,
            Kind::Income => ExpenseType::Income,
        }
    }
}

fn parse_amount(value: &str) -> std::result::Result<MoneyCents, String> {
    value.parse::<MoneyCents>().map_err(|err| err.to_string())
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, engine::DATE_FORMAT)
        .map_err(|err| format!("expected dd-MM-yyyy: {err}"))
}

fn print_account(account: &Account) {
    println!(
        "{}\t{}\t{}\t{}",
        account.account_no, account.bank_name, account.account_holder_name, account.balance
    );
}

fn print_transaction(tx: &Transaction) {
    println!(
        "{}\t{}\t{}\t{}\t{}",
        tx.transaction_id,
        tx.date.format(engine::DATE_FORMAT),
        tx.account_no,
        tx.expense_type.as_str(),
        tx.amount
    );
}

pub async fn run(engine: &Engine, command: Command) -> Result<()> {
    match command {
        Command::Account(command) => run_account(engine, command).await,
        Command::Tx(command) => run_tx(engine, command).await,
        Command::Schema(command) => run_schema(engine, command).await,
    }
}

async fn run_account(engine: &Engine, command: AccountCommand) -> Result<()> {
    let accounts = engine.accounts();
    match command {
        AccountCommand::List => {
            for account in accounts.list_accounts().await? {
                print_account(&account);
            }
        }
        AccountCommand::Show { account_no } => {
            print_account(&accounts.get_account(&account_no).await?);
        }
        AccountCommand::Add(args) => {
            let account = Account::new(
                args.account_no,
                args.bank_name,
                args.account_holder_name,
                args.balance,
            );
            accounts.add_account(&account).await?;
            print_account(&account);
        }
        AccountCommand::Remove { account_no } => {
            accounts.remove_account(&account_no).await?;
            println!("removed {account_no}");
        }
    }
    Ok(())
}

async fn run_tx(engine: &Engine, command: TxCommand) -> Result<()> {
    match command {
        TxCommand::Log(args) => {
            let date: DateTime<Utc> = match args.date {
                Some(day) => day.and_time(chrono::NaiveTime::MIN).and_utc(),
                None => Utc::now(),
            };
            let tx = engine
                .record(date, &args.account_no, args.kind.into(), args.amount)
                .await?;
            print_transaction(&tx);
        }
        TxCommand::List { limit } => {
            let txs = match limit {
                Some(limit) => engine.transactions().list_recent_transactions(limit).await?,
                None => engine.transactions().list_all_transactions().await?,
            };
            for tx in &txs {
                print_transaction(tx);
            }
        }
    }
    Ok(())
}

async fn run_schema(engine: &Engine, command: SchemaCommand) -> Result<()> {
    let storage = engine.storage();
    match command {
        SchemaCommand::Status => {
            let status = storage.schema_status().await?;
            for name in &status.applied {
                println!("applied\t{name}");
            }
            for name in &status.pending {
                println!("pending\t{name}");
            }
            for name in &status.unknown {
                println!("unknown\t{name}");
            }
        }
        SchemaCommand::Reset => {
            storage.reset().await?;
            println!("schema reset");
        }
    }
    Ok(())
}
