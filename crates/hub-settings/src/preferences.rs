//! Key/value preference storage.
//!
//! Preferences persist user view state across sessions. Reads and writes are
//! synchronous and never fail from the caller's point of view: storage
//! problems are logged at `warn` and the value falls back to its default.
//!
//! The on-disk store is a single JSON object at
//! `~/.config/gamepal/preferences.json` (`%APPDATA%\gamepal\` on Windows).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PreferencesError;

/// Storage contract used by list views and the library.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    /// Fire-and-forget write.
    fn set(&self, key: &str, value: Value);
}

/// Reads `key` and decodes it, or `None` if absent or malformed.
pub fn load<T: DeserializeOwned>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed preference");
            None
        }
    }
}

/// Encodes `value` and writes it under `key`.
pub fn save<T: Serialize>(store: &dyn PreferenceStore, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(v) => store.set(key, v),
        Err(e) => tracing::warn!(key, error = %e, "failed to encode preference"),
    }
}

/// Volatile store, used in tests and when no config dir is writable.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
    }
}

/// Store backed by one JSON object file, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonFilePreferences {
    /// Opens the store at the default location.
    pub fn open_default() -> Self {
        Self::open(preferences_path())
    }

    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read preferences, using defaults"
                );
                Map::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current values to disk.
    pub fn flush(&self) -> Result<(), PreferencesError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        write_values(&self.path, &values)
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        if let Err(e) = write_values(&self.path, &values) {
            tracing::warn!(
                path = %self.path.display(),
                key,
                error = %e,
                "failed to persist preference"
            );
        }
    }
}

/// Default preferences file path.
pub fn preferences_path() -> PathBuf {
    preferences_path_in(&config_base_dir())
}

fn preferences_path_in(config_base: &Path) -> PathBuf {
    config_base.join("gamepal").join("preferences.json")
}

fn read_values(path: &Path) -> Result<Map<String, Value>, PreferencesError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(PreferencesError::NotAnObject(path.display().to_string())),
    }
}

fn write_values(path: &Path, values: &Map<String, Value>) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(values)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn memory_get_set() {
        let store = MemoryPreferences::new();
        assert!(store.get("k").is_none());
        store.set("k", json!(["a", "b"]));
        assert_eq!(store.get("k"), Some(json!(["a", "b"])));
    }

    #[test]
    fn typed_helpers_roundtrip() {
        let store = MemoryPreferences::new();
        let sample = Sample {
            name: "x".into(),
            count: 3,
        };
        save(&store, "sample", &sample);
        assert_eq!(load::<Sample>(&store, "sample"), Some(sample));
    }

    #[test]
    fn malformed_value_loads_as_none() {
        let store = MemoryPreferences::new();
        store.set("sample", json!("not an object"));
        assert_eq!(load::<Sample>(&store, "sample"), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("preferences.json");

        let store = JsonFilePreferences::open(&path);
        store.set("installed-hidden-columns", json!(["operatingSystem"]));
        assert!(path.exists());

        let reopened = JsonFilePreferences::open(&path);
        assert_eq!(
            reopened.get("installed-hidden-columns"),
            Some(json!(["operatingSystem"]))
        );
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("preferences.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFilePreferences::open(&path);
        assert!(store.get("anything").is_none());

        store.set("k", json!(1));
        let reopened = JsonFilePreferences::open(&path);
        assert_eq!(reopened.get("k"), Some(json!(1)));
    }

    #[test]
    fn non_object_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("preferences.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(
            read_values(&path),
            Err(PreferencesError::NotAnObject(_))
        ));
    }

    #[test]
    fn flush_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("preferences.json");
        let store = JsonFilePreferences::open(&path);
        store.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "{}");
    }

    #[test]
    fn path_layout() {
        let base = Path::new("/home/user/.config");
        assert_eq!(
            preferences_path_in(base),
            PathBuf::from("/home/user/.config/gamepal/preferences.json")
        );
    }
}
