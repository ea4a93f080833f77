//! Clipboard commands queued from UI to the clipboard worker.

/// Fire-and-forget request to place already-rendered text on the system
/// clipboard. The UI never waits on the result; the worker reports back as
/// a [`crate::controller::events::UiEvent`].
pub enum ClipboardCommand {
    Copy {
        label: &'static str,
        text: String,
    },
}
