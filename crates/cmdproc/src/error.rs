use std::{fmt, io};
use thiserror::Error;

/// A single problem found in one command definition.
///
/// `command` is the definition's long name, or its index in the table when
/// the long name is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Please specify a long command name for: {command}")]
    MissingLongName { command: String },

    #[error(
        "Please specify a short name whose length doesn't exceed its corresponding long one for: {command}"
    )]
    ShortNameTooLong { command: String },

    #[error("Please specify a Parse function for command: {command}")]
    MissingParser { command: String },

    #[error("Please specify a Run function for command: {command}")]
    MissingRunner { command: String },

    #[error("Please specify a Help text for command: {command}")]
    MissingHelp { command: String },

    #[error("Command name '{name}' must not contain whitespace for: {command}")]
    NameContainsWhitespace { command: String, name: String },

    #[error("Command name '{name}' is already used by '{other}' for: {command}")]
    DuplicateName {
        command: String,
        name: String,
        other: String,
    },
}

impl DefinitionError {
    /// Identifier of the offending definition.
    pub fn command(&self) -> &str {
        match self {
            Self::MissingLongName { command }
            | Self::ShortNameTooLong { command }
            | Self::MissingParser { command }
            | Self::MissingRunner { command }
            | Self::MissingHelp { command }
            | Self::NameContainsWhitespace { command, .. }
            | Self::DuplicateName { command, .. } => command,
        }
    }
}

/// Problems with the command table, reported synchronously at start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("commands not defined")]
    EmptyTable,

    #[error("invalid command table:\n{}", DefinitionList(.0))]
    InvalidDefinitions(Vec<DefinitionError>),
}

impl ConfigError {
    /// Every definition problem carried by this error, empty for `EmptyTable`.
    pub fn problems(&self) -> &[DefinitionError] {
        match self {
            Self::EmptyTable => &[],
            Self::InvalidDefinitions(problems) => problems,
        }
    }
}

struct DefinitionList<'a>(&'a [DefinitionError]);

impl fmt::Display for DefinitionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for problem in self.0 {
            writeln!(f, "{}", problem)?;
        }
        Ok(())
    }
}

/// Per-line failures. Never fatal to the dispatch loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Error: unknown command: '{name}'{}", HelpHint(.help.as_deref()))]
    UnknownCommand { name: String, help: Option<String> },

    #[error("{command}: {source}")]
    Parse {
        command: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{command}: {source}")]
    Run {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

struct HelpHint<'a>(Option<&'a str>);

impl fmt::Display for HelpHint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(help) => write!(f, " - try '{}' for help", help),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No Tokio runtime available to run the dispatch loop: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),

    #[error("Failed to spawn line reader: {0}")]
    Spawn(#[from] io::Error),
}

/// Returned when the dispatch loop has already exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("command processor already terminated")]
    Closed,
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
