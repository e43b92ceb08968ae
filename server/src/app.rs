//! Core application

use std::io::Read;

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::data::{DataError, SearchService};
use crate::data::entity::Entity;
use crate::data::filters::{CompiledPredicate, FilterLimits, compile_filter_with_limits};
use crate::data::sql::{Backend, bind_predicate_for};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!(app = APP_NAME, "Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self {
            config: AppConfig::load(&cli_config)?,
        };

        match command {
            Commands::Fields { entity } => {
                print!("{}", render_fields(entity));
                Ok(())
            }
            Commands::Compile {
                entity,
                filter,
                dialect,
            } => {
                let raw = read_filter(&filter)?;
                println!(
                    "{}",
                    render_compiled(entity, &raw, dialect, &app.config.filters)?
                );
                Ok(())
            }
            Commands::Search { entity, filter } => {
                let raw = read_filter(&filter)?;
                let ids = app.search(entity, &raw).await?;
                println!("{}", serde_json::to_string(&ids)?);
                Ok(())
            }
        }
    }

    /// Compile `raw` and run it against the configured database
    async fn search(&self, entity: Entity, raw: &str) -> Result<Vec<i64>> {
        let predicate = compile(entity, raw, &self.config.filters)?;

        let service = SearchService::init(&self.config.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to {} database",
                    self.config.database.backend
                )
            })?;

        tracing::debug!(backend = %service.backend(), "Connected");

        let result = service.repository().search_ids(entity, &predicate).await;
        service.close().await;

        let ids = result.map_err(|e| search_error(entity, e))?;
        tracing::info!(entity = %entity, matches = ids.len(), "Search completed");
        Ok(ids)
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Filter text from the argument, or stdin for `-`
fn read_filter(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read filter from stdin")?;
    Ok(raw)
}

fn compile(entity: Entity, raw: &str, limits: &FilterLimits) -> Result<CompiledPredicate> {
    compile_filter_with_limits(raw, &entity.allowlist(), limits)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
}

/// Search failure with a retry hint for connection-level errors
fn search_error(entity: Entity, e: DataError) -> anyhow::Error {
    let hint = if e.is_transient() {
        " (connection problem, retrying may succeed)"
    } else {
        ""
    };
    let message = format!("Search on {} failed{}", entity.table(), hint);
    anyhow::Error::new(e).context(message)
}

/// One field per line; JSON columns are marked
fn render_fields(entity: Entity) -> String {
    let allowlist = entity.allowlist();
    let mut out = String::new();
    for field in allowlist.fields() {
        out.push_str(field);
        if allowlist.is_json(field) {
            out.push_str(" (json)");
        }
        out.push('\n');
    }
    out
}

/// Compiled predicate as JSON, or the bound query when a dialect is given
fn render_compiled(
    entity: Entity,
    raw: &str,
    dialect: Option<Backend>,
    limits: &FilterLimits,
) -> Result<String> {
    let predicate = compile(entity, raw, limits)?;
    let rendered = match dialect {
        Some(backend) => {
            let bound = bind_predicate_for(backend.dialect(), &predicate, &entity.allowlist())?;
            serde_json::to_string_pretty(&bound)?
        }
        None => serde_json::to_string_pretty(&predicate)?,
    };
    Ok(rendered)
}
