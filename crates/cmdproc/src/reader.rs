use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Starts the line reader on its own thread.
///
/// The thread blocks inside the read and cannot be interrupted; it ends
/// when the source reports end-of-stream or an error, or when the dispatch
/// loop is gone and the next line has nowhere to go. Until then it may
/// outlive the processor and is only reclaimed when the process exits.
pub(crate) fn spawn<R>(
    source: R,
    capacity: usize,
    prompt: Option<String>,
    thread_name: String,
    sink: Arc<dyn DiagnosticSink>,
) -> io::Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);

    thread::Builder::new()
        .name(thread_name)
        .spawn(move || read_lines(source, tx, prompt, sink))?;

    Ok(rx)
}

fn read_lines<R: BufRead>(
    mut source: R,
    tx: mpsc::Sender<String>,
    prompt: Option<String>,
    sink: Arc<dyn DiagnosticSink>,
) {
    let mut buffer = Vec::new();

    loop {
        if let Some(prompt) = &prompt
            && let Err(e) = write_prompt(&mut io::stdout().lock(), prompt)
        {
            debug!(log_type = "console", "Failed to write prompt: {}", e);
        }

        buffer.clear();
        match source.read_until(b'\n', &mut buffer) {
            Ok(0) => {
                debug!(log_type = "console", "Line source exhausted");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                sink.report(Diagnostic::Read(e));
                break;
            }
        }

        // Invalid UTF-8 is replaced so one bad line cannot end the stream.
        let line = String::from_utf8_lossy(&buffer).into_owned();
        if tx.blocking_send(line).is_err() {
            debug!(
                log_type = "console",
                "Dispatch loop gone, line reader terminating"
            );
            break;
        }
    }
    // Dropping `tx` closes the line channel.
}

fn write_prompt<W: Write>(out: &mut W, prompt: &str) -> io::Result<()> {
    out.write_all(prompt.as_bytes())?;
    out.flush()
}
