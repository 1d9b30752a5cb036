//! Line-oriented session shell.
//!
//! The session reads commands from a line source, writes reports to a line
//! sink, and owns the plant collection for its whole lifetime. It handles
//! the shell verbs itself and hands everything else to the [`Dispatcher`]:
//!
//! - `EXIT` ends the current input (a script, or the whole session).
//! - `HELP` prints the configured help file or the built-in text.
//! - `READ <file>` runs a script against the same collection.

use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::dispatch::{CommandOutput, DispatchOptions, Dispatcher};
use crate::config::Config;
use crate::core::command::split_verb;
use crate::error::{HerbariumError, Result};
use crate::storage::PlantCollection;
use crate::util::read_to_string_limited;

/// Help text printed when no help file is configured.
pub const BUILTIN_HELP: &str = "\
Commands:
  ADD <tree|shrub|cactus>, <name>, <attribute>
      tree: age in years, shrub: flowering month, cactus: spine length
  REM <age|month|spine> <op> <value>
      op is one of =, <, >, <=, >= (month supports = only)
  PRINT
  HELP
  READ <file>
  EXIT";

/// Whether the current input should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Counters collected over a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Commands executed, including HELP and READ.
    pub commands: usize,
    /// Commands that produced a diagnostic.
    pub failures: usize,
    /// Plants left in the collection.
    pub plants: usize,
}

/// A session over a line sink.
pub struct Session<W: Write> {
    collection: PlantCollection,
    config: Config,
    dispatcher: Dispatcher,
    out: W,
    depth: u32,
    summary: SessionSummary,
}

impl<W: Write> Session<W> {
    /// Create a new session with an empty collection.
    pub fn new(config: Config, options: DispatchOptions, out: W) -> Self {
        Self {
            collection: PlantCollection::new(),
            config,
            dispatcher: Dispatcher::new(options),
            out,
            depth: 0,
            summary: SessionSummary::default(),
        }
    }

    /// The collection owned by this session.
    pub fn collection(&self) -> &PlantCollection {
        &self.collection
    }

    /// Counters for the commands run so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            plants: self.collection.len(),
            ..self.summary.clone()
        }
    }

    /// Consume the session and return its sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run commands from a line source until `EXIT` or end of input.
    ///
    /// In interactive mode the configured prompt is written before each
    /// line, unless reports are JSON. A line that is not valid UTF-8 is
    /// reported as a diagnostic and skipped.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> Result<()> {
        let prompt = interactive && !self.dispatcher.options().json;
        let mut buf = Vec::new();
        loop {
            if prompt {
                write!(self.out, "{}", self.config.session.prompt).map_err(sink_error)?;
                self.out.flush().map_err(sink_error)?;
            }

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .map_err(|err| HerbariumError::storage(PathBuf::from("<input>"), err))?;
            if read == 0 {
                break;
            }

            let flow = match std::str::from_utf8(&buf) {
                Ok(line) => self.execute_line(line)?,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping line that is not valid UTF-8");
                    self.emit(&CommandOutput::failure("", "Line is not valid UTF-8."))?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Run a single line.
    ///
    /// Only failures to write to the sink are returned as errors; command
    /// problems are reported as diagnostics.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Flow::Continue);
        }
        if trimmed == "EXIT" {
            return Ok(Flow::Exit);
        }

        let (verb, rest) = split_verb(trimmed);
        let output = match verb {
            "HELP" => self.help(),
            "READ" => {
                let target = rest.trim();
                if target.is_empty() {
                    CommandOutput::failure("READ", "READ needs a file name.")
                } else {
                    return self.read_script(Path::new(target)).map(|_| Flow::Continue);
                }
            }
            _ => self.dispatcher.run(&mut self.collection, trimmed),
        };

        self.emit(&output)?;
        Ok(Flow::Continue)
    }

    /// Run every line of a script file against this session.
    ///
    /// `EXIT` inside the script ends only the script. Unreadable files and
    /// nesting beyond `max_script_depth` are reported as diagnostics.
    pub fn read_script(&mut self, path: &Path) -> Result<()> {
        let max_depth = self.config.session.max_script_depth;
        if self.depth >= max_depth {
            tracing::warn!(path = %path.display(), max_depth, "script nesting too deep");
            let output = CommandOutput::failure(
                "READ",
                format!(
                    "Cannot read {}: scripts nested deeper than {}.",
                    path.display(),
                    max_depth
                ),
            );
            return self.emit(&output);
        }

        let content = match read_to_string_limited(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(error = %err, "failed to open script");
                let output = CommandOutput::failure(
                    "READ",
                    format!("Unable to open file: {}", path.display()),
                );
                return self.emit(&output);
            }
        };

        tracing::debug!(path = %path.display(), depth = self.depth + 1, "running script");
        // The script's own lines report for themselves.
        self.summary.commands += 1;
        self.depth += 1;
        let result = self.run_lines(&content);
        self.depth -= 1;
        result
    }

    fn run_lines(&mut self, content: &str) -> Result<()> {
        for line in content.lines() {
            if self.execute_line(line)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn help(&self) -> CommandOutput {
        let Some(path) = self.config.session.help_file.as_deref() else {
            return help_output(BUILTIN_HELP);
        };
        match read_to_string_limited(path) {
            Ok(text) => help_output(&text),
            Err(err) => {
                tracing::warn!(error = %err, "failed to open help file");
                CommandOutput::failure(
                    "HELP",
                    format!("Unable to open help file: {}", path.display()),
                )
            }
        }
    }

    fn emit(&mut self, output: &CommandOutput) -> Result<()> {
        self.summary.commands += 1;
        if !output.success {
            self.summary.failures += 1;
        }

        let formatted = self.dispatcher.format_output(output);
        if !formatted.is_empty() {
            writeln!(self.out, "{}", formatted).map_err(sink_error)?;
        }
        Ok(())
    }
}

fn help_output(text: &str) -> CommandOutput {
    CommandOutput::success("HELP", text.lines().map(str::to_string).collect())
}

fn sink_error(err: std::io::Error) -> HerbariumError {
    HerbariumError::storage(PathBuf::from("<output>"), err)
}
