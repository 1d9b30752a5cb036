//! Command dispatcher for Herbarium.
//!
//! Maps ADD, REM and PRINT onto collection operations. Every line yields a
//! [`CommandOutput`]; errors become diagnostics instead of aborting the
//! session.

use serde::Serialize;

use crate::core::{command::split_verb, Command, Plant};
use crate::error::HerbariumError;
use crate::storage::PlantCollection;

/// Options for rendering dispatcher output.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Output as JSON, one object per command.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output of a single command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput {
    /// Whether the command succeeded.
    pub success: bool,
    /// The command verb as typed.
    pub command: String,
    /// Report lines in display order.
    pub lines: Vec<String>,
    /// Number of plants removed by REM.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
    /// Plants listed by PRINT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plants: Option<Vec<Plant>>,
    /// Diagnostic if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandOutput {
    /// Create a successful output with report lines.
    pub fn success(command: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            success: true,
            command: command.into(),
            lines,
            removed: None,
            plants: None,
            error: None,
        }
    }

    /// Create a failed output carrying a diagnostic.
    pub fn failure(command: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            command: command.into(),
            lines: Vec::new(),
            removed: None,
            plants: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed output from an error.
    pub fn from_error(command: impl Into<String>, err: &HerbariumError) -> Self {
        Self::failure(command, err.diagnostic())
    }
}

/// The dispatcher implementation.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    options: DispatchOptions,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(options: DispatchOptions) -> Self {
        Self { options }
    }

    /// The rendering options.
    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Parse one line and run it against the collection.
    ///
    /// The line is fully parsed before the collection is touched.
    pub fn run(&self, collection: &mut PlantCollection, line: &str) -> CommandOutput {
        let (verb, _) = split_verb(line);
        match Command::parse(line) {
            Ok(command) => self.execute(collection, command),
            Err(err) => {
                tracing::debug!(line, error = %err, "rejected command");
                CommandOutput::from_error(verb, &err)
            }
        }
    }

    /// Run an already parsed command.
    pub fn execute(&self, collection: &mut PlantCollection, command: Command) -> CommandOutput {
        match command {
            Command::Add(plant) => {
                collection.add(plant);
                CommandOutput::success("ADD", Vec::new())
            }
            Command::Remove(condition) => {
                let removed = collection.remove_where(&condition);
                let mut output = CommandOutput::success("REM", Vec::new());
                output.removed = Some(removed);
                output
            }
            Command::Print => {
                let mut output = CommandOutput::success("PRINT", collection.list());
                output.plants = Some(collection.iter().cloned().collect());
                output
            }
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CommandOutput) -> String {
        if self.options.quiet {
            return String::new();
        }

        if self.options.json {
            serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            Self::format_human_readable(output)
        }
    }

    /// Format output as report lines.
    fn format_human_readable(output: &CommandOutput) -> String {
        if !output.success {
            return output
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string());
        }
        output.lines.join("\n")
    }
}
