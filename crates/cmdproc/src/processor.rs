use std::io::{self, BufRead};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::command::CommandDefinition;
use crate::config::ProcessorConfig;
use crate::diagnostics::{DiagnosticSink, StderrSink};
use crate::dispatch::run_loop;
use crate::error::Result;
use crate::format::Style;
use crate::reader;
use crate::signal::{self, ShutdownSignal};
use crate::table::{CommandTable, validate_styled};

/// Validated command table plus the settings used to run it.
///
/// Building one validates the definitions; starting it spawns the line
/// reader thread and the dispatch task on the current Tokio runtime and
/// hands back the [`ShutdownSignal`].
pub struct CommandProcessor {
    table: Arc<CommandTable>,
    config: ProcessorConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl CommandProcessor {
    pub fn new(commands: Vec<CommandDefinition>) -> Result<Self> {
        Self::with_config(commands, ProcessorConfig::default())
    }

    pub fn with_config(commands: Vec<CommandDefinition>, config: ProcessorConfig) -> Result<Self> {
        let style = Style::new(config.color);
        let table = validate_styled(commands, style)?;
        debug!(
            log_type = "console",
            "Validated command table with {} commands",
            table.len()
        );

        Ok(Self {
            table,
            config,
            sink: Arc::new(StderrSink::new(style)),
        })
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn table(&self) -> &Arc<CommandTable> {
        &self.table
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Starts reading commands from stdin.
    pub fn start(self) -> Result<ShutdownSignal> {
        self.start_with_source(io::BufReader::new(io::stdin()))
    }

    pub fn start_with_source<R>(self, source: R) -> Result<ShutdownSignal>
    where
        R: BufRead + Send + 'static,
    {
        let runtime = Handle::try_current()?;

        let lines = reader::spawn(
            source,
            self.config.effective_line_buffer(),
            self.config.prompt.clone(),
            self.config.reader_thread_name.clone(),
            self.sink.clone(),
        )?;

        let (signal, listener) = signal::channel();
        runtime.spawn(run_loop(self.table, lines, listener, self.sink));

        Ok(signal)
    }
}

/// Validates `commands` and starts processing lines from stdin.
///
/// Must be called from within a Tokio runtime.
pub fn start(commands: Vec<CommandDefinition>) -> Result<ShutdownSignal> {
    CommandProcessor::new(commands)?.start()
}

/// Like [`start`], reading lines from `source` instead of stdin.
pub fn start_with_source<R>(commands: Vec<CommandDefinition>, source: R) -> Result<ShutdownSignal>
where
    R: BufRead + Send + 'static,
{
    CommandProcessor::new(commands)?.start_with_source(source)
}
