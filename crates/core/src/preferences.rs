use indexmap::IndexSet;
use serde_yaml_ng::{Mapping, Value};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Key in the data file that lists players who turned automatic coloring off.
pub const DISABLED_USERS_KEY: &str = "disabled-users";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("expected a mapping at the top of {0}")]
    NotAMapping(PathBuf),
}

/// Players who opted out of automatic name coloring. Everyone else is enabled.
#[derive(Debug, Default, Clone)]
pub struct PreferenceStore {
    disabled: IndexSet<String>,
}

impl PreferenceStore {
    pub fn new() -> PreferenceStore {
        Default::default()
    }

    pub fn is_coloring_enabled(&self, player: &str) -> bool {
        !self.disabled.contains(player)
    }

    /// Flips `player`'s preference. Returns `true` if coloring is now enabled.
    pub fn toggle(&mut self, player: &str) -> bool {
        if self.disabled.shift_remove(player) {
            true
        } else {
            self.disabled.insert(player.to_owned());
            false
        }
    }

    /// Replaces the whole set. Entries that are not strings are skipped.
    pub fn load<'a>(&mut self, entries: impl IntoIterator<Item = &'a Value>) {
        self.disabled.clear();
        for entry in entries {
            match entry {
                Value::String(name) => {
                    self.disabled.insert(name.clone());
                }
                other => warn!("Ignoring non-string entry in {}: {:?}", DISABLED_USERS_KEY, other),
            }
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.disabled.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.disabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disabled.is_empty()
    }
}

/// The YAML document the store is mirrored to.
///
/// Only [`DISABLED_USERS_KEY`] is managed here; other keys survive rewrites.
#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> PreferenceFile {
        PreferenceFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty list if and only if the file does not exist yet.
    pub fn save_default(&self) -> Result<(), PersistenceError> {
        if self.path.exists() {
            return Ok(());
        }
        debug!("Creating {}", self.path.display());
        self.write(&[])
    }

    fn read_document(&self) -> Result<Mapping, PersistenceError> {
        let str = match fs::read_to_string(&self.path) {
            Ok(str) => str,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(err) => return Err(err.into()),
        };
        match serde_yaml_ng::from_str::<Value>(&str)? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(PersistenceError::NotAMapping(self.path.clone())),
        }
    }

    /// Raw list entries, in file order. A missing file or key reads as empty.
    pub fn read_entries(&self) -> Result<Vec<Value>, PersistenceError> {
        let mut doc = self.read_document()?;
        Ok(match doc.remove(DISABLED_USERS_KEY) {
            Some(Value::Sequence(entries)) => entries,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!(
                    "{} in {} is not a list ({:?}), treating it as empty",
                    DISABLED_USERS_KEY,
                    self.path.display(),
                    other
                );
                Vec::new()
            }
        })
    }

    pub fn load_into(&self, store: &mut PreferenceStore) -> Result<(), PersistenceError> {
        let entries = self.read_entries()?;
        store.load(&entries);
        Ok(())
    }

    /// Overwrites the list in the file with `snapshot`.
    pub fn write(&self, snapshot: &[String]) -> Result<(), PersistenceError> {
        let mut doc = match self.read_document() {
            Ok(doc) => doc,
            Err(err) => {
                warn!("Replacing unreadable {}: {}", self.path.display(), err);
                Mapping::new()
            }
        };
        let list = snapshot.iter().cloned().map(Value::String).collect();
        doc.insert(Value::from(DISABLED_USERS_KEY), Value::Sequence(list));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml_ng::to_string(&doc)?)?;
        Ok(())
    }
}
