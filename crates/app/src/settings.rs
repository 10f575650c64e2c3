//! Handles settings for the application.
//!
//! Values are read from an optional TOML file (see
//! `config/expense_ledger.toml`) and then from `EXPENSE_LEDGER__*`
//! environment variables, e.g. `EXPENSE_LEDGER__APP__LEVEL=debug`.
use config::{Config, ConfigError, Environment, File};
use engine::SchemaPolicy;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/expense_ledger.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where the ledger lives: `database = "memory"` or
/// `database = { sqlite = "path/to/file.db" }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("expense_ledger.db".to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub schema_policy: SchemaPolicy,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("EXPENSE_LEDGER").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert!(matches!(settings.database, Database::Sqlite(ref p) if p == "expense_ledger.db"));
        assert_eq!(settings.schema_policy, SchemaPolicy::Migrate);
    }

    #[test]
    fn reads_every_section() {
        let settings = from_toml(
            r#"
            schema_policy = "reset"

            [app]
            level = "debug"

            [database]
            sqlite = "/tmp/ledger.db"
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert!(matches!(settings.database, Database::Sqlite(ref p) if p == "/tmp/ledger.db"));
        assert_eq!(settings.schema_policy, SchemaPolicy::Reset);
    }

    #[test]
    fn memory_database() {
        let settings = from_toml(r#"database = "memory""#);
        assert!(matches!(settings.database, Database::Memory));
    }
}
