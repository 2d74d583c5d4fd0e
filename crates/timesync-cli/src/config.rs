use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Column budget for `vis`.
    pub max_columns: usize,
    /// Print results as JSON instead of tables.
    pub json: bool,
    /// Answer every confirmation prompt with "yes".
    pub assume_yes: bool,
    /// Explicit tracing filter; falls back to `RUST_LOG`, then `warn`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_columns: timesync_core::DEFAULT_MAX_COLUMNS,
            json: false,
            assume_yes: false,
            log_filter: None,
        }
    }
}

impl Config {
    /// Flags win over environment variables, which win over defaults;
    /// clap already applied that layering, this only validates.
    pub fn from_cli(cli: &Cli) -> Result<Config> {
        if cli.max_columns == 0 {
            bail!("--max-columns (TIMESYNC_MAX_COLUMNS) must be at least 1");
        }

        let log_filter = cli
            .log
            .as_deref()
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
            .map(str::to_owned);

        Ok(Config {
            max_columns: cli.max_columns,
            json: cli.json,
            assume_yes: cli.yes,
            log_filter,
        })
    }

    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_filter {
            Some(filter) => EnvFilter::new(filter),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        }
    }
}
