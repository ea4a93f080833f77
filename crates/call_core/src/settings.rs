//! Officer-level settings and the key-value store they persist through.
//!
//! Settings outlive any single call: they load once at startup, save on
//! every change, and are untouched by a call reset. The store itself is a
//! capability; [`EphemeralStore`] is the always-available in-memory
//! fallback, the durable file-backed implementation lives in the `storage`
//! crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Exact, case-sensitive keys under which settings persist.
pub const KEY_OFFICER_NAME: &str = "officer_name";
pub const KEY_REFERENCE_PREFIX: &str = "reference_prefix";
pub const KEY_REFERENCE_NUMBER: &str = "reference_number";
pub const KEY_WEBCHAT_ID: &str = "webchat_id";
pub const KEY_INCLUDE_WEBCHAT_ID: &str = "include_webchat_id";
pub const KEY_AUI_EXT: &str = "aui_ext";
pub const KEY_INCLUDE_AUI_EXT: &str = "include_aui_ext";

/// Canonical default for the case-reference prefix.
pub const DEFAULT_REFERENCE_PREFIX: &str = "CCEL-";

/// Synchronous string key-value persistence. Implementations must be
/// write-through: a value handed to [`SettingsStore::set`] survives a
/// process restart.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store. Used in tests and as the fallback when no durable
/// store is available; values die with the process.
#[derive(Debug, Default)]
pub struct EphemeralStore {
    entries: HashMap<String, String>,
}

impl EphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for EphemeralStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Officer settings as edited in the settings panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub officer_name: String,
    pub reference_prefix: String,
    /// Free text; bump operations parse it, treating non-numeric as 0.
    pub reference_number: String,
    pub webchat_id: String,
    pub include_webchat_id: bool,
    pub aui_ext: String,
    pub include_aui_ext: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            officer_name: String::new(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            reference_number: String::new(),
            webchat_id: String::new(),
            include_webchat_id: false,
            aui_ext: String::new(),
            include_aui_ext: false,
        }
    }
}

impl Settings {
    /// Loads settings from the store. Absent keys fall back to the
    /// documented defaults, so a fresh profile loads cleanly.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let text = |key: &str| store.get(key).unwrap_or_default();
        let flag = |key: &str| store.get(key).is_some_and(|value| value == "true");
        Self {
            officer_name: text(KEY_OFFICER_NAME),
            reference_prefix: store
                .get(KEY_REFERENCE_PREFIX)
                .unwrap_or_else(|| DEFAULT_REFERENCE_PREFIX.to_string()),
            reference_number: text(KEY_REFERENCE_NUMBER),
            webchat_id: text(KEY_WEBCHAT_ID),
            include_webchat_id: flag(KEY_INCLUDE_WEBCHAT_ID),
            aui_ext: text(KEY_AUI_EXT),
            include_aui_ext: flag(KEY_INCLUDE_AUI_EXT),
        }
    }

    /// Writes every setting back, trimmed. Called on each change.
    pub fn save(&self, store: &mut dyn SettingsStore) {
        store.set(KEY_OFFICER_NAME, self.officer_name.trim());
        store.set(KEY_REFERENCE_PREFIX, self.reference_prefix.trim());
        store.set(KEY_REFERENCE_NUMBER, self.reference_number.trim());
        store.set(KEY_WEBCHAT_ID, self.webchat_id.trim());
        store.set(KEY_INCLUDE_WEBCHAT_ID, bool_value(self.include_webchat_id));
        store.set(KEY_AUI_EXT, self.aui_ext.trim());
        store.set(KEY_INCLUDE_AUI_EXT, bool_value(self.include_aui_ext));
    }

    /// Restores and persists the documented defaults. Distinct from a call
    /// reset, which never touches settings.
    pub fn reset(store: &mut dyn SettingsStore) -> Self {
        let defaults = Self::default();
        defaults.save(store);
        defaults
    }

    /// The case reference as rendered in notes: prefix and number
    /// concatenated. An empty number means no reference has been taken yet,
    /// whatever the prefix says.
    pub fn composed_reference(&self) -> String {
        let number = self.reference_number.trim();
        if number.is_empty() {
            return String::new();
        }
        format!("{}{number}", self.reference_prefix.trim())
    }

    /// Steps the reference counter. Non-numeric current values count as 0
    /// and the counter floors at 0.
    pub fn bump_reference_number(&mut self, delta: i64) {
        let current = self.reference_number.trim().parse::<i64>().unwrap_or(0);
        let next = (current + delta).max(0);
        self.reference_number = next.to_string();
    }
}

fn bool_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
