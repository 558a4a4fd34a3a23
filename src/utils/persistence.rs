//! JSON persistence helpers for ~/.flappy/ and the best-score store.
//!
//! The best score lives in a string-keyed store with overwrite semantics.
//! `JsonFileStore` keeps every key in one JSON object on disk; `MemoryStore`
//! backs tests and `--reset-best` dry runs.

use crate::constants::{BEST_SCORE_KEY, SAVE_DIR_NAME, STORAGE_FILE};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(SAVE_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.flappy/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Load a JSON file from ~/.flappy/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => load_json_at_or_default(&path),
        Err(_) => T::default(),
    }
}

/// Load a JSON file from an explicit path, returning `T::default()` if missing or invalid.
pub fn load_json_at_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON to an explicit path.
pub fn save_json_at<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Opaque string key-value store.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite `key` with `value`. Last writer wins.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// In-memory store, nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file. Every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or corrupt file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_json_at_or_default(&path);
        Self { path, entries }
    }

    /// Open ~/.flappy/storage.json.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(save_path(STORAGE_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        save_json_at(&self.path, &self.entries)
    }
}

/// Parse a stored best score. Missing, negative or non-numeric values read as 0;
/// a fractional value is truncated.
pub fn parse_best_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    if let Ok(score) = raw.parse::<u32>() {
        return score;
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Read the best score from the store.
pub fn read_best_score<S: ScoreStore + ?Sized>(store: &S) -> u32 {
    parse_best_score(store.get(BEST_SCORE_KEY).as_deref())
}

/// Overwrite the stored best score with its decimal string form.
pub fn write_best_score<S: ScoreStore + ?Sized>(store: &mut S, best: u32) -> io::Result<()> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}
