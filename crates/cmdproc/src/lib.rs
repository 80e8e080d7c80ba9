//! Concurrent console command processor.
//!
//! A static table of [`CommandDefinition`]s is validated once, then a dispatch
//! loop reads newline-delimited input from a line source, normalizes each line
//! and hands it to the matching command's [`Parser`] and [`Runner`]. The caller
//! keeps a [`ShutdownSignal`] to request a cooperative shutdown and to wait
//! until the loop has fully exited.
//!
//! ```no_run
//! use cmdproc::{CommandDefinition, parse_none, run_help};
//!
//! # async fn demo() -> Result<(), cmdproc::ProcessorError> {
//! let commands = vec![
//!     CommandDefinition::new("help")
//!         .short("h")
//!         .help("Show this help message")
//!         .parser(parse_none())
//!         .runner(run_help()),
//! ];
//!
//! let signal = cmdproc::start(commands)?;
//! signal.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod diagnostics;
mod dispatch;
pub mod error;
pub mod format;
pub mod help;
pub mod normalize;
pub mod processor;
mod reader;
pub mod signal;
pub mod table;

pub use command::{
    CommandDefinition, CommandRunner, Parser, Runner, parse_none, parse_words, run_help,
};
pub use config::ProcessorConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, StderrSink};
pub use error::{ConfigError, DefinitionError, DispatchError, ProcessorError, SignalError};
pub use normalize::normalize;
pub use processor::{CommandProcessor, start, start_with_source};
pub use signal::ShutdownSignal;
pub use table::{CommandTable, ValidatedCommand, validate};
