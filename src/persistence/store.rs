use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::warn;

/// String-keyed blob storage. Hosts that keep their own storage (an
/// embedder with a settings database, a browser-style key-value shim)
/// implement this and hand it to the save manager.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Stores each key as `<key>.json` in the platform data directory.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new() -> Self {
        // Qualifiers determine the platform default location.
        let data_dir = ProjectDirs::from("io.github", "wordlet", "Wordlet")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_dir(data_dir)
    }

    pub fn with_dir(data_dir: PathBuf) -> Self {
        if !data_dir.exists() {
            let _ = fs::create_dir_all(&data_dir);
        }
        Self { data_dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path(key), value) {
            warn!(target: "persistence", "Failed to write {:?}: {}", self.path(key), e);
        }
    }
}

/// In-memory store, used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
