//! Acceptance: officer settings survive a simulated application restart.

use call_core::settings::{Settings, SettingsStore, DEFAULT_REFERENCE_PREFIX};
use storage::FileStore;
use tempfile::tempdir;

#[test]
fn settings_round_trip_across_store_instances() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    let settings = Settings {
        officer_name: "Dana Iqbal".to_string(),
        reference_prefix: "CCEL-".to_string(),
        reference_number: "1042".to_string(),
        webchat_id: "WC-77".to_string(),
        include_webchat_id: true,
        aui_ext: "4411".to_string(),
        include_aui_ext: true,
    };

    {
        let mut store = FileStore::open(&path);
        settings.save(&mut store);
    }

    let reloaded = Settings::load(&FileStore::open(&path));
    assert_eq!(reloaded, settings);
}

#[test]
fn settings_reset_persists_documented_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    {
        let mut store = FileStore::open(&path);
        let mut settings = Settings::load(&store);
        settings.officer_name = "Dana Iqbal".to_string();
        settings.include_aui_ext = true;
        settings.save(&mut store);
        Settings::reset(&mut store);
    }

    let store = FileStore::open(&path);
    let reloaded = Settings::load(&store);
    assert_eq!(reloaded, Settings::default());
    assert_eq!(reloaded.reference_prefix, DEFAULT_REFERENCE_PREFIX);
    assert_eq!(store.get("officer_name").as_deref(), Some(""));
}
