use clap::builder::BoolishValueParser;
use clap::{ColorChoice, Parser, Subcommand};

/// Find the longest common timeframe among timeframes in different UTC offsets.
#[derive(Parser, Debug, Clone)]
#[command(name = "timesync", version, about)]
pub struct Cli {
    /// Maximum number of columns a visualization row may use.
    #[arg(
        long,
        env = "TIMESYNC_MAX_COLUMNS",
        default_value_t = timesync_core::DEFAULT_MAX_COLUMNS
    )]
    pub max_columns: usize,

    /// Print results as JSON instead of tables. The env var also takes
    /// `1`/`0`, `yes`/`no`, `on`/`off`.
    #[arg(long, env = "TIMESYNC_JSON", value_parser = BoolishValueParser::new())]
    pub json: bool,

    /// Answer every confirmation prompt with "yes".
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Tracing filter (e.g. `debug`, `timesync_core=trace`). Defaults to RUST_LOG, then `warn`.
    #[arg(long, env = "TIMESYNC_LOG")]
    pub log: Option<String>,
}

/// One line typed at the `>>` prompt.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "timesync",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    color = ColorChoice::Never,
    help_template = "Commands:\n{subcommands}"
)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Add a timeframe: add <id> <utc-offset> <start-date> <start-time> [<end-date>] <end-time>
    Add {
        id: String,
        #[arg(allow_hyphen_values = true)]
        utc_offset: String,
        start_date: String,
        start_time: String,
        /// `[<end-date>] <end-time>`; the end date defaults to the start date.
        #[arg(num_args = 1..=2, required = true, value_name = "END")]
        end: Vec<String>,
    },
    /// Remove a timeframe
    Remove { id: String },
    /// Clear all timeframes
    Reset,
    /// Find the common timeframe
    #[command(visible_aliases = ["run", "sync"])]
    Find,
    /// List all the timeframes
    #[command(visible_alias = "list")]
    Ls,
    /// Visualize the timeframes
    Vis,
    /// Clear the screen
    Clear,
    /// Show this help
    Help,
    /// Exit TimeSync
    #[command(visible_aliases = ["quit", "X"])]
    Exit,
}

impl ReplCommand {
    /// Name used to prefix error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ReplCommand::Add { .. } => "add",
            ReplCommand::Remove { .. } => "remove",
            ReplCommand::Reset => "reset",
            ReplCommand::Find => "find",
            ReplCommand::Ls => "ls",
            ReplCommand::Vis => "vis",
            ReplCommand::Clear => "clear",
            ReplCommand::Help => "help",
            ReplCommand::Exit => "exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ReplCommand, clap::Error> {
        ReplLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }

    #[test]
    fn test_add_with_shared_date() {
        let command = parse("add london +00:00 16-03-26 0900 1700").unwrap();
        assert_eq!(
            command,
            ReplCommand::Add {
                id: "london".to_string(),
                utc_offset: "+00:00".to_string(),
                start_date: "16-03-26".to_string(),
                start_time: "0900".to_string(),
                end: vec!["1700".to_string()],
            }
        );
    }

    #[test]
    fn test_add_with_negative_offset_and_end_date() {
        let command = parse("add ny -05:00 16-03-26 22:00 17-03-26 02:00").unwrap();
        let ReplCommand::Add { utc_offset, end, .. } = command else {
            panic!("expected add");
        };
        assert_eq!(utc_offset, "-05:00");
        assert_eq!(end, vec!["17-03-26", "02:00"]);
    }

    #[test]
    fn test_add_argument_count_checked() {
        assert!(parse("add london +00:00 16-03-26 0900").is_err());
        assert!(parse("add london +00:00 16-03-26 0900 a b c").is_err());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("run").unwrap(), ReplCommand::Find);
        assert_eq!(parse("sync").unwrap(), ReplCommand::Find);
        assert_eq!(parse("list").unwrap(), ReplCommand::Ls);
        assert_eq!(parse("quit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse("X").unwrap(), ReplCommand::Exit);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("launch").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
