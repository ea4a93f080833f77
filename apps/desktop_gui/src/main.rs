mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use call_core::settings::{EphemeralStore, SettingsStore};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use storage::FileStore;

use backend_bridge::commands::ClipboardCommand;
use controller::events::UiEvent;
use ui::app::{CallScribeApp, PersistedPanelState, PANEL_STORAGE_KEY};

/// Desktop note-taking companion for VAT helpline officers.
#[derive(Parser, Debug)]
struct Args {
    /// Directory holding the persisted officer settings. Defaults to the
    /// per-user application data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn settings_path(args: &Args) -> anyhow::Result<PathBuf> {
    match &args.data_dir {
        Some(dir) => Ok(dir.join("settings.json")),
        None => storage::default_store_path(),
    }
}

/// Officer settings degrade to a session-only store when no per-user data
/// directory can be resolved; the app stays usable either way.
fn open_settings_store(args: &Args) -> Box<dyn SettingsStore> {
    match settings_path(args) {
        Ok(path) => Box::new(FileStore::open(path)),
        Err(err) => {
            tracing::warn!("settings will not persist this session: {err}");
            Box::new(EphemeralStore::new())
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let store = open_settings_store(&args);

    let (clipboard_tx, clipboard_rx) = bounded::<ClipboardCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(clipboard_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CallScribe")
            .with_inner_size([1120.0, 780.0])
            .with_min_inner_size([880.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CallScribe",
        options,
        Box::new(move |cc| {
            let panels = cc.storage.and_then(|storage| {
                storage
                    .get_string(PANEL_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedPanelState>(&text).ok())
            });
            Ok(Box::new(CallScribeApp::new(
                store,
                clipboard_tx,
                ui_rx,
                panels,
            )))
        }),
    )
}
