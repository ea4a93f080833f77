//! Events flowing from the clipboard worker back into the UI loop.

pub enum UiEvent {
    CopyFinished { label: &'static str, ok: bool },
}
