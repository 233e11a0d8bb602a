//! Persisted UI preferences over a simple key/value store.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use super::codec::{
    KEY_MAX_COUNTERMODEL_NODES, KEY_MIN_COUNTERMODEL_NODES, KEY_OPERATOR_NOTATIONS,
    KEY_SHUFFLE_COUNTERMODELS,
};
use crate::{error::Result, logic::OperatorNotations};

pub const KEY_ACTIVE_TAB_INDEX: &str = "activeTabIndex";

/// String key/value storage that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Store kept in a single JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: &Path) -> Self {
        let values = fs::read_to_string(path)
            .ok()
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(values) => Some(values),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed preferences");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tableau-tui/preferences.json")
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

/// Store that forgets everything on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Typed access to the preferences the workspace remembers.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    fn write(&mut self, key: &str, value: String) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "Failed to persist preference");
        }
    }

    pub fn operator_notations(&self) -> Option<String> {
        self.store.get(KEY_OPERATOR_NOTATIONS)
    }

    pub fn set_operator_notations(&mut self, notations: OperatorNotations) {
        self.write(KEY_OPERATOR_NOTATIONS, notations.name().to_string());
    }

    /// Visible tab of the persisted stack; 0 when missing or unparseable.
    pub fn active_panel_index(&self) -> usize {
        self.store
            .get(KEY_ACTIVE_TAB_INDEX)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_active_panel_index(&mut self, index: usize) {
        self.write(KEY_ACTIVE_TAB_INDEX, index.to_string());
    }

    pub fn countermodel_bounds(&self) -> (Option<u32>, Option<u32>) {
        let parse = |key| self.store.get(key).and_then(|v| v.trim().parse().ok());
        (
            parse(KEY_MIN_COUNTERMODEL_NODES),
            parse(KEY_MAX_COUNTERMODEL_NODES),
        )
    }

    pub fn set_countermodel_bounds(&mut self, min: u32, max: u32) {
        self.write(KEY_MIN_COUNTERMODEL_NODES, min.to_string());
        self.write(KEY_MAX_COUNTERMODEL_NODES, max.to_string());
    }

    pub fn should_shuffle_countermodels(&self) -> bool {
        self.store.get(KEY_SHUFFLE_COUNTERMODELS).as_deref() == Some("true")
    }

    pub fn set_should_shuffle_countermodels(&mut self, shuffle: bool) {
        self.write(KEY_SHUFFLE_COUNTERMODELS, shuffle.to_string());
    }
}
