use std::{fs, io::Read as _, path::PathBuf};

use anyhow::{Context, Result};
use call_core::{
    render,
    settings::Settings,
    templates, CallFormState,
};
use clap::{Parser, ValueEnum};
use shared::domain::NoteTarget;
use storage::FileStore;

/// Renders call notes from a saved intake snapshot, using the same
/// persisted officer settings as the desktop GUI.
#[derive(Parser, Debug)]
struct Args {
    /// Call snapshot JSON; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Which note to print.
    #[arg(long, value_enum, default_value_t = NoteArg::Both)]
    note: NoteArg,

    /// Directory holding the persisted officer settings. Defaults to the
    /// per-user application data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the brief template topics and exit.
    #[arg(long)]
    list_templates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NoteArg {
    Ccel,
    Aui,
    Both,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    if args.list_templates {
        for topic in templates::topics() {
            println!("{topic}");
        }
        return Ok(());
    }

    let settings = load_settings(&args);
    let mut state = read_snapshot(&args)?;
    state.normalize();

    match args.note {
        NoteArg::Ccel => println!("{}", render::render_note(NoteTarget::Ccel, &state, &settings)),
        NoteArg::Aui => println!("{}", render::render_note(NoteTarget::Aui, &state, &settings)),
        NoteArg::Both => {
            println!("== CCEL note ==");
            println!("{}", render::render_primary_note(&state, &settings));
            println!();
            println!("== AUI note ==");
            println!("{}", render::render_secondary_note(&state, &settings));
        }
    }

    Ok(())
}

/// Settings are optional for a render; a missing store just means the
/// documented defaults.
fn load_settings(args: &Args) -> Settings {
    let path = match &args.data_dir {
        Some(dir) => Some(dir.join("settings.json")),
        None => storage::default_store_path().ok(),
    };
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading officer settings");
            Settings::load(&FileStore::open(path))
        }
        None => Settings::default(),
    }
}

fn read_snapshot(args: &Args) -> Result<CallFormState> {
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read snapshot from stdin")?;
            buffer
        }
    };
    serde_json::from_str(&raw).context("snapshot is not valid call state JSON")
}
