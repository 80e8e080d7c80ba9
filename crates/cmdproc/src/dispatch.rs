use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::diagnostics::DiagnosticSink;
use crate::error::DispatchError;
use crate::normalize::{normalize, parser_line};
use crate::signal::ShutdownListener;
use crate::table::CommandTable;

/// Runs until the line source is exhausted or shutdown is requested, then
/// closes the shutdown handle.
pub(crate) async fn run_loop(
    table: Arc<CommandTable>,
    mut lines: mpsc::Receiver<String>,
    mut shutdown: ShutdownListener,
    sink: Arc<dyn DiagnosticSink>,
) {
    info!(
        log_type = "console",
        "Command processor started with {} commands",
        table.len()
    );

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => {
                    if let Err(e) = dispatch_line(&table, &line) {
                        sink.report(e.into());
                    }
                }
                None => {
                    debug!(log_type = "console", "Line channel closed, stopping");
                    break;
                }
            },
            request = shutdown.recv() => match request {
                Some(true) => {
                    debug!(log_type = "console", "Shutdown requested");
                    break;
                }
                Some(false) => {
                    trace!(log_type = "console", "Ignoring shutdown probe");
                }
                None => {
                    debug!(log_type = "console", "Every shutdown handle dropped, stopping");
                    break;
                }
            },
        }
    }

    shutdown.close();
    info!(log_type = "console", "Command processor terminated");
}

/// Normalizes, selects, parses and runs one input line.
///
/// Blank lines are skipped.
pub(crate) fn dispatch_line(table: &CommandTable, raw: &str) -> Result<(), DispatchError> {
    let (name, remainder) = normalize(raw);
    if name.is_empty() {
        return Ok(());
    }

    let cmd = table.select(&name)?;
    debug!(
        log_type = "console",
        "Dispatching '{}' to {}",
        name,
        cmd.long_name()
    );

    let args = cmd
        .parser()
        .parse(&parser_line(&name, &remainder))
        .map_err(|source| DispatchError::Parse {
            command: cmd.long_name().to_string(),
            source,
        })?;

    cmd.runner()
        .run(args)
        .map_err(|source| DispatchError::Run {
            command: cmd.long_name().to_string(),
            source,
        })
}
