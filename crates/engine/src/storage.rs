//! The storage handle: owns the database connection and its schema.
//!
//! There is no global instance. Whoever composes the stores builds a
//! `Storage` and hands clones of it around; clones share one connection pool.

use std::path::Path;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;

use crate::ResultEngine;

/// What to do when the stored schema version differs from this build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Apply pending migrations and keep existing data.
    #[default]
    Migrate,
    /// Drop every table and recreate the schema. All data is lost. Applies to
    /// upgrades and downgrades alike.
    Reset,
}

/// Applied/pending migration counts, as seen by this build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
    /// Applied migrations this build does not know about (a newer binary
    /// wrote the database).
    pub unknown: Vec<String>,
}

impl SchemaStatus {
    pub fn is_current(&self) -> bool {
        self.pending.is_empty() && self.unknown.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Storage {
    database: DatabaseConnection,
}

impl Storage {
    /// Connects to `url` and brings the schema in line with `policy`.
    pub async fn connect(url: &str, policy: SchemaPolicy) -> ResultEngine<Self> {
        tracing::debug!("connecting to {url}");
        let database = Database::connect(url).await?;
        let storage = Self { database };
        storage.reconcile(policy).await?;
        Ok(storage)
    }

    /// Opens (creating if missing) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>, policy: SchemaPolicy) -> ResultEngine<Self> {
        let url = format!("sqlite:{}?mode=rwc", path.as_ref().display());
        Self::connect(&url, policy).await
    }

    /// A private in-memory database with the schema in place.
    pub async fn in_memory() -> ResultEngine<Self> {
        Self::connect("sqlite::memory:", SchemaPolicy::Migrate).await
    }

    /// Wraps an existing connection. The schema is assumed to be in place.
    pub fn from_connection(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Connection for queries that only read.
    pub fn reader(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Connection for statements that write. Same connection as `reader`.
    pub fn writer(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Drops both tables and recreates them.
    pub async fn reset(&self) -> ResultEngine<()> {
        tracing::warn!("resetting ledger schema, all data is discarded");
        Migrator::fresh(&self.database).await?;
        Ok(())
    }

    pub async fn schema_status(&self) -> ResultEngine<SchemaStatus> {
        let known: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        Migrator::install(&self.database).await?;
        let applied: Vec<String> = Migrator::get_migration_models(&self.database)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let pending = known
            .iter()
            .filter(|name| !applied.contains(name))
            .cloned()
            .collect();
        let unknown = applied
            .iter()
            .filter(|name| !known.contains(name))
            .cloned()
            .collect();

        Ok(SchemaStatus {
            applied,
            pending,
            unknown,
        })
    }

    async fn reconcile(&self, policy: SchemaPolicy) -> ResultEngine<()> {
        match policy {
            SchemaPolicy::Migrate => {
                Migrator::up(&self.database, None).await?;
            }
            SchemaPolicy::Reset => {
                let status = self.schema_status().await?;
                if !status.is_current() {
                    tracing::warn!(
                        pending = status.pending.len(),
                        unknown = status.unknown.len(),
                        "schema version mismatch"
                    );
                    self.reset().await?;
                }
            }
        }
        Ok(())
    }
}
