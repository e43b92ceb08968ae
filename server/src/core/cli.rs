use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{ENV_CONFIG, ENV_DATABASE_URL, ENV_DB_BACKEND, ENV_MAX_FILTER_BYTES};
use crate::data::entity::Entity;
use crate::data::sql::Backend;

#[derive(Parser)]
#[command(name = "tdjobs")]
#[command(version, about = "Compile and run JSON search filters for jobs, offers and invitations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Database backend (sqlite or postgres)
    #[arg(long, global = true, env = ENV_DB_BACKEND, value_parser = parse_database_backend)]
    pub backend: Option<DatabaseBackend>,

    /// Database connection URL
    #[arg(long, global = true, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Maximum accepted filter size in bytes
    #[arg(long, global = true, env = ENV_MAX_FILTER_BYTES)]
    pub max_filter_bytes: Option<usize>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, postgres",
            s
        )),
    }
}

/// Parse SQL dialect from CLI string
fn parse_dialect(s: &str) -> Result<Backend, String> {
    s.parse()
}

/// Parse entity name from CLI string
fn parse_entity(s: &str) -> Result<Entity, String> {
    s.parse()
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List the fields an entity can be filtered on
    Fields {
        #[arg(value_parser = parse_entity)]
        entity: Entity,
    },
    /// Compile a filter and print the predicate
    Compile {
        #[arg(value_parser = parse_entity)]
        entity: Entity,
        /// Filter JSON, or `-` to read it from stdin
        filter: String,
        /// Bind placeholders for a dialect (sqlite or postgres)
        #[arg(long, value_parser = parse_dialect)]
        dialect: Option<Backend>,
    },
    /// Run a filter against the configured database and print matching ids
    Search {
        #[arg(value_parser = parse_entity)]
        entity: Entity,
        /// Filter JSON, or `-` to read it from stdin
        filter: String,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub backend: Option<DatabaseBackend>,
    pub database_url: Option<String>,
    pub max_filter_bytes: Option<usize>,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            backend: cli.backend,
            database_url: cli.database_url.clone(),
            max_filter_bytes: cli.max_filter_bytes,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig::from(&cli);
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compile_command() {
        let cli = Cli::try_parse_from([
            "tdjobs",
            "compile",
            "jobs",
            r#"{"status": "ACTIVE"}"#,
            "--dialect",
            "postgres",
            "--max-filter-bytes",
            "128",
        ])
        .unwrap();

        let config = CliConfig::from(&cli);
        assert_eq!(config.max_filter_bytes, Some(128));
        match cli.command {
            Commands::Compile {
                entity,
                filter,
                dialect,
            } => {
                assert_eq!(entity, Entity::Job);
                assert_eq!(filter, r#"{"status": "ACTIVE"}"#);
                assert_eq!(dialect, Some(Backend::Postgres));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "tdjobs",
            "--backend",
            "PostgreSQL",
            "--database-url",
            "postgres://localhost/tdjobs",
            "search",
            "offer_records",
            "{}",
        ])
        .unwrap();

        let config = CliConfig::from(&cli);
        assert_eq!(config.backend, Some(DatabaseBackend::Postgres));
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/tdjobs")
        );
        assert!(matches!(
            cli.command,
            Commands::Search {
                entity: Entity::OfferRecord,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_entity() {
        assert!(Cli::try_parse_from(["tdjobs", "fields", "users"]).is_err());
    }

    #[test]
    fn test_parse_database_backend() {
        assert_eq!(
            parse_database_backend("sqlite").unwrap(),
            DatabaseBackend::Sqlite
        );
        assert!(parse_database_backend("mysql").is_err());
    }
}
