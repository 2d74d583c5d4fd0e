mod commands;
mod config;
mod input;
mod repl;

use std::io;

use anyhow::Result;
use clap::Parser;

use crate::commands::Cli;
use crate::config::Config;
use crate::repl::Repl;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    init_tracing(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Repl::new(stdin.lock(), stdout.lock(), config).run()
}

fn init_tracing(config: &Config) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}
