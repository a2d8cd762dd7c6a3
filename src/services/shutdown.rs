//! Idle wait until the process is interrupted.

use crate::{Error, Result};
use std::sync::mpsc;

/// Blocks until Ctrl-C (or SIGTERM) is received.
///
/// The interrupt is the normal way to stop the process once the game is set
/// up, so it is logged rather than reported as an error.
///
/// # Errors
///
/// Returns an error if the signal handler cannot be installed.
pub fn wait_for_interrupt() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .map_err(|e| Error::OperationFailed {
        operation: "install_signal_handler".to_string(),
        cause: e.to_string(),
    })?;

    tracing::info!("Setup complete, idling until interrupted");
    wait_on(&rx);
    tracing::info!("Interrupt received, stopping");
    Ok(())
}

/// Blocks until `rx` yields a value or every sender is gone.
fn wait_on(rx: &mpsc::Receiver<()>) {
    if rx.recv().is_err() {
        tracing::debug!("Interrupt channel closed");
    }
}
