//! Worker thread bridging the UI clipboard queue to the system clipboard.

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::backend_bridge::commands::ClipboardCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<ClipboardCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || worker_loop(cmd_rx, ui_tx));
}

fn worker_loop(cmd_rx: Receiver<ClipboardCommand>, ui_tx: Sender<UiEvent>) {
    while let Ok(command) = cmd_rx.recv() {
        match command {
            ClipboardCommand::Copy { label, text } => {
                let ok = copy_text(&text);
                debug!(label, ok, "clipboard copy finished");
                if ui_tx.send(UiEvent::CopyFinished { label, ok }).is_err() {
                    break;
                }
            }
        }
    }
}

/// Clipboard handles are not reused: some platforms invalidate a handle
/// between copies, so each request opens a fresh one and only a failure of
/// that attempt counts as a failed copy.
fn copy_text(text: &str) -> bool {
    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text.to_string()) {
            Ok(()) => true,
            Err(err) => {
                warn!("clipboard write failed: {err}");
                false
            }
        },
        Err(err) => {
            warn!("system clipboard unavailable: {err}");
            false
        }
    }
}
