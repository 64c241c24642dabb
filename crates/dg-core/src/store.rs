//! Key-value persistence for layouts.
//!
//! The layout is stored wholesale as one JSON blob under `LAYOUT_KEY`.
//! There is no versioning: a blob that does not parse is treated as if
//! nothing was stored.
//!
//! Storage itself is behind the `KeyValueStore` trait so each host picks
//! its backend:
//! - WASM: `window.localStorage`
//! - CLI/server: a JSON file (`FileStore`)
//! - tests: an in-memory map (`MemoryStore`)

use crate::error::StoreError;
use crate::model::Layout;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Fixed storage key of the saved layout.
pub const LAYOUT_KEY: &str = "dreamgarden-design";

// ─── Store trait ─────────────────────────────────────────────────────────

/// String-to-string storage with the semantics of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a key. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// ─── Layout persistence ──────────────────────────────────────────────────

/// Write the whole layout under `LAYOUT_KEY`.
pub fn save_layout(store: &mut dyn KeyValueStore, layout: &Layout) -> Result<(), StoreError> {
    let blob = layout.to_json()?;
    store.set(LAYOUT_KEY, &blob)?;
    log::debug!("saved layout with {} plants", layout.len());
    Ok(())
}

/// Read the saved layout. Absent, unreadable or malformed data all yield
/// an empty layout; this never fails.
pub fn load_layout(store: &dyn KeyValueStore) -> Layout {
    let blob = match store.get(LAYOUT_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Layout::new(),
        Err(err) => {
            log::warn!("error loading saved garden: {err}");
            return Layout::new();
        }
    };
    match Layout::from_json(&blob) {
        Ok(layout) => layout,
        Err(err) => {
            log::warn!("ignoring malformed saved garden: {err}");
            Layout::new()
        }
    }
}

/// Erase the saved layout.
pub fn erase_layout(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(LAYOUT_KEY)
}

// ─── In-memory store ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ─── File store ──────────────────────────────────────────────────────────

/// Replace `path` with what `fill` writes, staged in `tmp` and renamed into
/// place. On failure `tmp` is removed and `path` is left untouched.
pub fn replace_file<F>(path: &Path, tmp: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let result = File::create(tmp)
        .and_then(|mut file| {
            fill(&mut file)?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(tmp);
    }
    result
}

/// A JSON object on disk mapping keys to string blobs.
///
/// Every write replaces the file through a temporary sibling, so a crash
/// mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Like `read_map`, but a corrupt file is replaced rather than blocking
    /// every future write.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_map() {
            Err(StoreError::Encode(err)) => {
                log::warn!("{} is corrupt, starting fresh: {err}", self.path.display());
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(map)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        replace_file(&self.path, Path::new(&tmp), |file| file.write_all(text.as_bytes()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
