use clap::Parser;
use engine::{Engine, Storage};
use settings::Database;

mod cli;
mod error;
mod settings;

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = cli::Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expense_ledger={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let storage = open_storage(&settings, cli.database_url.as_deref()).await?;
    let engine = Engine::builder().storage(storage).build();

    cli::run(&engine, cli.command).await
}

async fn open_storage(
    settings: &settings::Settings,
    database_url: Option<&str>,
) -> error::Result<Storage> {
    let policy = settings.schema_policy;
    let storage = match (database_url, &settings.database) {
        (Some(url), _) => Storage::connect(url, policy).await?,
        (None, Database::Memory) => Storage::connect("sqlite::memory:", policy).await?,
        (None, Database::Sqlite(path)) => Storage::open(path, policy).await?,
    };
    tracing::debug!(?policy, "storage ready");
    Ok(storage)
}
