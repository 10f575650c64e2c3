use std::path::PathBuf;

use chrono::Utc;
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

use engine::{Account, Engine, ExpenseType, MoneyCents, SchemaPolicy, Storage};

fn test_db_path() -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();
    root.join(format!("ledger_{}.db", Uuid::new_v4()))
}

async fn seed(storage: Storage) {
    let engine = Engine::builder().storage(storage).build();
    engine
        .accounts()
        .add_account(&Account::new("A1", "BankX", "Alice", MoneyCents::new(100_00)))
        .await
        .unwrap();
    engine
        .record(Utc::now(), "A1", ExpenseType::Expense, MoneyCents::new(30_00))
        .await
        .unwrap();
}

async fn mark_unknown_migration(storage: &Storage) {
    let db = storage.writer();
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO seaql_migrations (version, applied_at) VALUES (?, ?)",
        vec!["m29990101_000000_from_the_future".into(), 0i64.into()],
    ))
    .await
    .unwrap();
}

#[tokio::test]
async fn fresh_database_is_current() {
    let storage = Storage::in_memory().await.unwrap();

    let status = storage.schema_status().await.unwrap();
    assert!(status.is_current());
    assert_eq!(status.applied.len(), 1);
}

#[tokio::test]
async fn reader_and_writer_share_the_database() {
    let storage = Storage::in_memory().await.unwrap();
    let engine = Engine::builder().storage(storage.clone()).build();
    engine
        .accounts()
        .add_account(&Account::new("A1", "BankX", "Alice", MoneyCents::ZERO))
        .await
        .unwrap();

    let db = storage.reader();
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            r#"SELECT COUNT(*) AS n FROM "account""#,
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get::<i64>("", "n").unwrap(), 1);
}

#[tokio::test]
async fn reset_discards_all_data() {
    let storage = Storage::in_memory().await.unwrap();
    seed(storage.clone()).await;

    storage.reset().await.unwrap();

    let engine = Engine::builder().storage(storage.clone()).build();
    assert!(engine.accounts().list_accounts().await.unwrap().is_empty());
    assert!(
        engine
            .transactions()
            .list_all_transactions()
            .await
            .unwrap()
            .is_empty()
    );
    assert!(storage.schema_status().await.unwrap().is_current());
}

#[tokio::test]
async fn reopen_with_migrate_keeps_data() {
    let path = test_db_path();
    seed(Storage::open(&path, SchemaPolicy::Migrate).await.unwrap()).await;

    let storage = Storage::open(&path, SchemaPolicy::Migrate).await.unwrap();
    let engine = Engine::builder().storage(storage).build();
    let account = engine.accounts().get_account("A1").await.unwrap();
    assert_eq!(account.balance, MoneyCents::new(70_00));
    assert_eq!(
        engine
            .transactions()
            .list_all_transactions()
            .await
            .unwrap()
            .len(),
        1
    );

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn reopen_with_reset_keeps_data_when_versions_match() {
    let path = test_db_path();
    seed(Storage::open(&path, SchemaPolicy::Migrate).await.unwrap()).await;

    let storage = Storage::open(&path, SchemaPolicy::Reset).await.unwrap();
    let engine = Engine::builder().storage(storage).build();
    assert_eq!(
        engine.accounts().list_account_numbers().await.unwrap(),
        vec!["A1"]
    );

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn reopen_with_reset_drops_data_on_version_mismatch() {
    let path = test_db_path();
    let storage = Storage::open(&path, SchemaPolicy::Migrate).await.unwrap();
    seed(storage.clone()).await;
    mark_unknown_migration(&storage).await;

    let status = storage.schema_status().await.unwrap();
    assert_eq!(status.unknown, vec!["m29990101_000000_from_the_future"]);
    assert!(!status.is_current());
    drop(storage);

    let storage = Storage::open(&path, SchemaPolicy::Reset).await.unwrap();
    let engine = Engine::builder().storage(storage.clone()).build();
    assert!(engine.accounts().list_accounts().await.unwrap().is_empty());
    assert!(storage.schema_status().await.unwrap().is_current());

    let _ = std::fs::remove_file(path);
}
