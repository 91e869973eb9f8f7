/// Key-value persistence for the high score.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::HIGH_SCORE_KEY;
use crate::entities::GameEvent;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ── File-backed store ────────────────────────────────────────────────────────

/// A flat JSON object of string values kept in a single file.
/// A missing file reads as an empty store.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; `None` when the file does not exist yet.
    fn read_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn parse(&self, raw: &str) -> Result<BTreeMap<String, String>> {
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(raw).with_context(|| format!("parsing {}", self.path.display()))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match self.read_raw()? {
            Some(raw) => self.parse(&raw),
            None => Ok(BTreeMap::new()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// A file that cannot be parsed is replaced rather than left to block
    /// every later write. I/O errors still fail.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_raw()? {
            Some(raw) => self.parse(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %format!("{e:#}"), "discarding unreadable store");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, body).with_context(|| format!("writing {}", self.path.display()))
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── High score ───────────────────────────────────────────────────────────────

/// Stored best score; 0 when absent. Unreadable or malformed values are
/// logged and treated as absent.
pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(%value, "ignoring malformed high score");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            tracing::warn!(error = %e, "could not read high score");
            0
        }
    }
}

pub fn save_high_score(store: &mut dyn KeyValueStore, score: u32) -> Result<()> {
    store.set(HIGH_SCORE_KEY, &score.to_string())
}

/// Persist whatever `events` say about the best score. Only a strictly
/// better score raises `NewHighScore`, so a tie never touches the store.
pub fn record_events(store: &mut dyn KeyValueStore, events: &[GameEvent]) -> Result<()> {
    for event in events {
        if let GameEvent::NewHighScore(score) = event {
            save_high_score(store, *score)?;
            tracing::info!(score, "new high score saved");
        }
    }
    Ok(())
}
