//! Command orchestration helpers from UI actions to the clipboard queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::ClipboardCommand;

/// Queues a copy request without blocking the UI. Returns false when the
/// request could not be queued at all; the caller surfaces that the same
/// way as a failed copy.
pub fn dispatch_clipboard_command(
    cmd_tx: &Sender<ClipboardCommand>,
    cmd: ClipboardCommand,
) -> bool {
    let ClipboardCommand::Copy { label, .. } = &cmd;
    let label = *label;

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(label, "queued ui->clipboard command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(label, "clipboard queue is full; dropping copy request");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(label, "clipboard worker disconnected; dropping copy request");
            false
        }
    }
}
