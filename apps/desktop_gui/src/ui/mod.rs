//! UI layer for the desktop GUI: app shell, form panels and note previews.

pub mod app;

pub use app::CallScribeApp;
