//! The interactive `>>` loop.
//!
//! Reads one command per line, drives the core [`Session`], and owns every
//! user-facing concern the core leaves out: prompts, confirmations, screen
//! clearing, and turning errors into messages.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use serde::Serialize;
use timesync_core::{report, CommonWindow, LocalizedWindow, Session, TimeFrame, TimeSyncError};
use tracing::debug;

use crate::commands::{ReplCommand, ReplLine};
use crate::config::Config;
use crate::input;

const PROMPT: &str = ">> ";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

#[derive(Serialize)]
struct FindReport<'a> {
    window: Option<&'a CommonWindow>,
    localized: &'a [LocalizedWindow],
}

#[derive(Serialize)]
struct ListedFrame<'a> {
    id: &'a str,
    #[serde(flatten)]
    frame: &'a TimeFrame,
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    session: Session,
    config: Config,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Repl {
            input,
            output,
            session: Session::new(),
            config,
        }
    }

    /// Run until `exit` is confirmed or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "TimeSync")?;
        writeln!(self.output, "Type `help` to list the commands.\n")?;

        while let Some(line) = self.read_line()? {
            if self.handle_line(&line)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match ReplLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
                writeln!(self.output, "Invalid command.")?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                write!(self.output, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        let name = command.name();
        debug!(command = name, "executing");
        match self.execute(command) {
            Ok(flow) => Ok(flow),
            // Failing to write to the terminal ends the session.
            Err(err) if err.downcast_ref::<io::Error>().is_some() => Err(err),
            Err(err) => {
                debug!(command = name, error = %err, "command failed");
                writeln!(self.output, "{name}: {err:#}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Add {
                id,
                utc_offset,
                start_date,
                start_time,
                end,
            } => self.add(&id, &utc_offset, &start_date, &start_time, &end)?,
            ReplCommand::Remove { id } => {
                self.session.remove(&id)?;
                writeln!(self.output, "Timeframe \"{id}\" removed.")?;
            }
            ReplCommand::Reset => self.reset()?,
            ReplCommand::Find => self.find()?,
            ReplCommand::Ls => self.list()?,
            ReplCommand::Vis => self.visualize()?,
            ReplCommand::Clear => {
                write!(self.output, "{CLEAR_SCREEN}")?;
            }
            ReplCommand::Help => {
                let help = ReplLine::command().render_help();
                writeln!(self.output, "{help}")?;
            }
            ReplCommand::Exit => {
                if self.confirm("Are you sure you want to exit TimeSync?")? {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn add(
        &mut self,
        id: &str,
        raw_offset: &str,
        start_date: &str,
        start_time: &str,
        end: &[String],
    ) -> Result<()> {
        let offset = input::parse_offset(raw_offset).context("utc-offset")?;
        let start = input::parse_datetime(start_date, start_time).context("start-time")?;
        let end = match end {
            [end_time] => input::parse_datetime(start_date, end_time),
            [end_date, end_time] => input::parse_datetime(end_date, end_time),
            _ => bail!("expected [<end-date>] <end-time>"),
        }
        .context("end-time")?;

        match self.session.add(id, offset, start, end) {
            Ok(()) => writeln!(self.output, "Timeframe added.")?,
            Err(TimeSyncError::DuplicateId(_)) => {
                writeln!(self.output, "A timeframe with ID \"{id}\" already exists.")?;
                let question = format!("Do you wish to overwrite the existing timeframe \"{id}\"?");
                if self.confirm(&question)? {
                    self.session.replace(id, offset, start, end)?;
                    writeln!(self.output, "Timeframe \"{id}\" overwritten.")?;
                } else {
                    writeln!(
                        self.output,
                        "Action aborted. Timeframe entry was not overwritten."
                    )?;
                }
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let question =
            "Are you sure you want to reset this session? This will clear all stored timeframes.";
        if self.confirm(question)? {
            let removed = self.session.clear();
            writeln!(self.output, "Removed all timeframes ({removed}).")?;
        } else {
            writeln!(self.output, "Reset aborted.")?;
        }
        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let window = self.session.find_common_window()?;
        let localized = match &window {
            Some(window) => self.session.localize(window)?,
            None => Vec::new(),
        };

        if self.config.json {
            return self.print_json(&FindReport {
                window: window.as_ref(),
                localized: &localized,
            });
        }

        match window {
            None => writeln!(
                self.output,
                "No common timeframe found among the timeframes provided."
            )?,
            Some(window) => {
                writeln!(self.output, "Common timeframe found.\n")?;
                writeln!(self.output, "{}", report::window_summary(&window))?;
                write!(self.output, "{}", report::localized_table(&localized))?;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        if self.config.json {
            let frames: Vec<ListedFrame<'_>> = self
                .session
                .list()
                .map(|(id, frame)| ListedFrame { id, frame })
                .collect();
            serde_json::to_writer_pretty(&mut self.output, &frames)?;
            writeln!(self.output)?;
            return Ok(());
        }

        if self.session.is_empty() {
            writeln!(self.output, "No timeframes added.")?;
            return Ok(());
        }
        let table = report::timeframe_table(self.session.list());
        write!(self.output, "{table}")?;
        Ok(())
    }

    fn visualize(&mut self) -> Result<()> {
        let visualization = self.session.render(self.config.max_columns)?;
        if self.config.json {
            return self.print_json(&visualization);
        }
        writeln!(self.output, "{}\n", report::legend(&visualization))?;
        write!(
            self.output,
            "{}",
            report::visualization_table(&visualization)
        )?;
        Ok(())
    }

    /// Ask a yes/no question; anything but `y`/`yes` means no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.config.assume_yes {
            writeln!(self.output, "{question} [N/y] y")?;
            return Ok(true);
        }
        writeln!(self.output, "{question} [N/y]")?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn print_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.output, value)?;
        writeln!(self.output)?;
        Ok(())
    }
}

#[cfg(test)]
impl<R, W> Repl<R, W> {
    fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, config: Config) -> (String, Session) {
        let mut output = Vec::new();
        let mut repl = Repl::new(Cursor::new(script.as_bytes()), &mut output, config);
        repl.run().unwrap();
        let session = repl.session().clone();
        (String::from_utf8(output).unwrap(), session)
    }

    fn run(script: &str) -> String {
        run_script(script, Config::default()).0
    }

    // ── find tests ───────────────────────────────────────────────────────

    #[test]
    fn test_find_overlap_example() {
        let out = run(
            "add london +00:00 16-03-26 0900 1700\n\
             add karachi +0500 16-03-26 09:00 17:00\n\
             find\n",
        );
        assert!(out.contains("Common timeframe found."), "{out}");
        assert!(out.contains("Start Time : 16-03-26 09:00 UTC"), "{out}");
        assert!(out.contains("End Time   : 16-03-26 12:00 UTC"), "{out}");
        assert!(out.contains("Duration   : 3 hours"), "{out}");
        assert!(out.contains("| karachi | +05:00     | 16-03-26 14:00"), "{out}");
    }

    #[test]
    fn test_find_without_overlap() {
        let out = run(
            "add a +00:00 16-03-26 0000 0400\n\
             add b +00:00 16-03-26 0500 0800\n\
             run\n",
        );
        assert!(out.contains("No common timeframe found"), "{out}");
    }

    #[test]
    fn test_find_with_one_frame() {
        let out = run("add a +00:00 16-03-26 0000 0400\nfind\n");
        assert!(
            out.contains("find: Insufficient timeframes: 1 timeframe(s) provided"),
            "{out}"
        );
    }

    // ── add and overwrite tests ──────────────────────────────────────────

    #[test]
    fn test_duplicate_declined_keeps_original() {
        let (out, session) = run_script(
            "add a +00:00 16-03-26 0900 1700\n\
             add a +05:00 16-03-26 0100 0200\n\
             n\n",
            Config::default(),
        );
        assert!(out.contains("A timeframe with ID \"a\" already exists."), "{out}");
        assert!(out.contains("Action aborted."), "{out}");
        assert_eq!(session.len(), 1);
        let frame = session.registry().get("a").unwrap();
        assert_eq!(frame.offset().to_string(), "+00:00");
    }

    #[test]
    fn test_duplicate_confirmed_replaces() {
        let (out, session) = run_script(
            "add a +00:00 16-03-26 0900 1700\n\
             add a +05:00 16-03-26 0100 0200\n\
             YES\n",
            Config::default(),
        );
        assert!(out.contains("Timeframe \"a\" overwritten."), "{out}");
        assert_eq!(
            session.registry().get("a").unwrap().offset().to_string(),
            "+05:00"
        );
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let config = Config {
            assume_yes: true,
            ..Config::default()
        };
        let (out, session) = run_script(
            "add a +00:00 16-03-26 0900 1700\nreset\nls\n",
            config,
        );
        assert!(out.contains("[N/y] y"), "{out}");
        assert!(out.contains("No timeframes added."), "{out}");
        assert!(session.is_empty());
    }

    #[test]
    fn test_input_errors_name_the_argument() {
        let out = run(
            "add a +05:15 16-03-26 0900 1700\n\
             add a +00:00 16-3-2026 0900 1700\n\
             add a +00:00 16-03-26 0900 99:00\n\
             add a +00:00 16-03-26 1700 0900\n",
        );
        assert!(out.contains("add: utc-offset: Invalid UTC offset"), "{out}");
        assert!(out.contains("add: start-time: Incorrect format of date"), "{out}");
        assert!(out.contains("add: end-time: Illegal datetime"), "{out}");
        assert!(out.contains("add: Invalid interval"), "{out}");
    }

    #[test]
    fn test_end_date_spans_midnight() {
        let (_, session) = run_script(
            "add ny -05:00 16-03-26 2200 17-03-26 0200\n",
            Config::default(),
        );
        let frame = session.registry().get("ny").unwrap();
        assert_eq!(
            (frame.normalized_end() - frame.normalized_start()).num_hours(),
            4
        );
    }

    // ── remove, list and vis tests ───────────────────────────────────────

    #[test]
    fn test_remove_and_unknown_id() {
        let out = run("add a +00:00 16-03-26 0900 1700\nremove a\nremove a\n");
        assert!(out.contains("Timeframe \"a\" removed."), "{out}");
        assert!(out.contains("remove: Unknown timeframe"), "{out}");
    }

    #[test]
    fn test_list_table() {
        let out = run("add london +00:00 16-03-26 0900 1700\nls\n");
        assert!(out.contains("| ID     | UTC Offset | Start Time"), "{out}");
        assert!(out.contains("| london | +00:00     | 16-03-26 09:00"), "{out}");
    }

    #[test]
    fn test_visualize() {
        let out = run(
            "add a +00:00 16-03-26 0000 0400\n\
             add b +00:00 16-03-26 0200 0800\n\
             vis\n",
        );
        assert!(out.contains("# = 5 minutes"), "{out}");
        assert!(out.contains(&format!("| a  | {}", "#".repeat(48))), "{out}");
    }

    // ── JSON output tests ────────────────────────────────────────────────

    #[test]
    fn test_json_find() {
        let config = Config {
            json: true,
            ..Config::default()
        };
        let (out, _) = run_script(
            "add london +00:00 16-03-26 0900 1700\n\
             add karachi +05:00 16-03-26 0900 1700\n\
             find\n",
            config,
        );
        let start = out.find('{').unwrap();
        let end = out.rfind('}').unwrap();
        let value: serde_json::Value = serde_json::from_str(&out[start..=end]).unwrap();
        assert_eq!(value["window"]["duration_minutes"], 180);
        assert_eq!(value["localized"][1]["offset"], "+05:00");
    }

    // ── Parsing and control flow tests ───────────────────────────────────

    #[test]
    fn test_unknown_and_usage_errors() {
        let out = run("launch\nadd a\n");
        assert!(out.contains("Invalid command."), "{out}");
        assert!(out.contains("required arguments were not provided"), "{out}");
    }

    #[test]
    fn test_exit_stops_reading() {
        let (out, session) = run_script(
            "exit\nno\nadd a +00:00 16-03-26 0900 1700\nquit\ny\nadd b +00:00 16-03-26 0900 1700\n",
            Config::default(),
        );
        assert!(out.contains("Are you sure you want to exit TimeSync? [N/y]"), "{out}");
        assert_eq!(session.len(), 1);
        assert!(session.registry().contains("a"));
    }

    #[test]
    fn test_help_lists_commands() {
        let out = run("help\n");
        assert!(out.contains("Commands:"), "{out}");
        assert!(out.contains("add"), "{out}");
        assert!(out.contains("vis"), "{out}");
    }
}
