use std::fmt;
use std::sync::Arc;

/// Extracts a command's arguments from its normalized command line.
///
/// The line handed to `parse` is the lower-cased command name, one space and
/// the trimmed remainder of the input. The returned tokens are given to the
/// command's [`Runner`].
pub trait Parser: Send + Sync {
    fn parse(&self, line: &str) -> anyhow::Result<Vec<String>>;
}

/// Executes a command with the arguments produced by its [`Parser`].
pub trait Runner: Send + Sync {
    fn run(&self, args: Vec<String>) -> anyhow::Result<()>;
}

impl<F> Parser for F
where
    F: Fn(&str) -> anyhow::Result<Vec<String>> + Send + Sync,
{
    fn parse(&self, line: &str) -> anyhow::Result<Vec<String>> {
        self(line)
    }
}

impl<F> Runner for F
where
    F: Fn(Vec<String>) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, args: Vec<String>) -> anyhow::Result<()> {
        self(args)
    }
}

/// What a command does once its line has been parsed.
#[derive(Clone)]
pub enum CommandRunner {
    Custom(Arc<dyn Runner>),
    /// Prints the help listing of the table this command belongs to.
    Help,
}

impl fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Help => f.write_str("Help"),
        }
    }
}

impl<R: Runner + 'static> From<R> for CommandRunner {
    fn from(runner: R) -> Self {
        Self::Custom(Arc::new(runner))
    }
}

/// Describes one command recognized by the console.
///
/// Both names are matched case-insensitively and must be unique across the
/// whole table. `long_name`, `help`, `parser` and `runner` are required;
/// the table validator reports every missing piece at once.
#[derive(Clone, Default)]
pub struct CommandDefinition {
    /// Optional short form of `long_name`, no longer than it.
    pub short_name: String,
    pub long_name: String,
    /// BNF-like description of the arguments, shown in help.
    pub arg_description: String,
    pub help: String,
    pub parser: Option<Arc<dyn Parser>>,
    pub runner: Option<CommandRunner>,
}

impl CommandDefinition {
    pub fn new(long_name: impl Into<String>) -> Self {
        Self {
            long_name: long_name.into(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    pub fn args(mut self, arg_description: impl Into<String>) -> Self {
        self.arg_description = arg_description.into();
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn parser<P: Parser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn runner(mut self, runner: impl Into<CommandRunner>) -> Self {
        self.runner = Some(runner.into());
        self
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("short_name", &self.short_name)
            .field("long_name", &self.long_name)
            .field("arg_description", &self.arg_description)
            .field("help", &self.help)
            .field("parser", &self.parser.as_ref().map(|_| ".."))
            .field("runner", &self.runner)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseNone;

impl Parser for ParseNone {
    fn parse(&self, _line: &str) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Parser for commands that take no arguments.
pub fn parse_none() -> ParseNone {
    ParseNone
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseWords;

impl Parser for ParseWords {
    fn parse(&self, line: &str) -> anyhow::Result<Vec<String>> {
        Ok(line.split_whitespace().skip(1).map(str::to_string).collect())
    }
}

/// Parser returning every whitespace separated word after the command name.
pub fn parse_words() -> ParseWords {
    ParseWords
}

/// Runner printing the help listing of the table it is registered in.
pub fn run_help() -> CommandRunner {
    CommandRunner::Help
}
