//! Shutdown handshake between the caller and the dispatch loop

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::error::SignalError;

/// Handle returned by `start`.
///
/// Send `true` to ask the dispatch loop to stop; `false` is accepted and
/// ignored. The loop closes the handle exactly once, after it has fully
/// exited, which is what [`closed`](Self::closed) waits for.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    requests: mpsc::Sender<bool>,
    done: watch::Receiver<bool>,
}

/// Loop side of the handshake.
pub(crate) struct ShutdownListener {
    requests: mpsc::Receiver<bool>,
    done: watch::Sender<bool>,
}

pub(crate) fn channel() -> (ShutdownSignal, ShutdownListener) {
    let (request_tx, request_rx) = mpsc::channel(1);
    let (done_tx, done_rx) = watch::channel(false);
    (
        ShutdownSignal {
            requests: request_tx,
            done: done_rx,
        },
        ShutdownListener {
            requests: request_rx,
            done: done_tx,
        },
    )
}

impl ShutdownSignal {
    /// Sends a request to the loop. Fails once the loop has terminated.
    pub async fn send(&self, stop: bool) -> Result<(), SignalError> {
        self.requests
            .send(stop)
            .await
            .map_err(|_| SignalError::Closed)
    }

    /// Resolves once the dispatch loop has exited.
    pub async fn closed(&self) {
        let mut done = self.done.clone();
        // An error means the loop dropped its side without publishing,
        // which also only happens once it is gone.
        let _ = done.wait_for(|finished| *finished).await;
    }

    pub fn is_closed(&self) -> bool {
        *self.done.borrow() || self.requests.is_closed()
    }

    /// Requests shutdown and waits for the loop to confirm it.
    pub async fn shutdown(self) {
        if self.send(true).await.is_err() {
            debug!(
                log_type = "console",
                "Command processor already terminated, ignoring shutdown request"
            );
        }
        self.closed().await;
    }
}

impl ShutdownListener {
    /// Next request, or `None` once every handle has been dropped.
    pub(crate) async fn recv(&mut self) -> Option<bool> {
        self.requests.recv().await
    }

    /// Closes the handle. Consuming `self` keeps this to a single call.
    pub(crate) fn close(mut self) {
        self.requests.close();
        self.done.send_replace(true);
    }
}
