use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::document::{self, Document};
use crate::error::Result;
use crate::outcome::Outcome;

/// File name suffix appended to the logical store name.
pub const FILE_SUFFIX: &str = ".db.json";

/// The `Store` maps string keys to arbitrary JSON values.
///
/// The whole mapping lives in one JSON object on disk. Every call reads the
/// file again and every mutation writes the full document back before
/// returning, so the file is the only state. There is no locking: two
/// handles on the same file race and the last write wins.
///
/// ```rust
/// # use jsondb::{Outcome, Result, Store};
/// # fn try_main() -> Result<()> {
/// let dir = tempfile::TempDir::new()?;
/// let store = Store::open(dir.path(), "scores")?;
/// store.modify("score", 10)?;
/// assert_eq!(store.add("score", 99)?, Outcome::AlreadyExists);
/// assert_eq!(store.get("score")?, Some(10.into()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Store {
    // backing file
    path: PathBuf,
    // file name used in log lines
    name: String,
    config: StoreConfig,
}

impl Store {
    /// Open `<dir>/<name>.db.json` with the default config.
    pub fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::open_with(dir, name, StoreConfig::default())
    }

    pub fn open_with(dir: impl AsRef<Path>, name: &str, config: StoreConfig) -> Result<Self> {
        Self::open_path(dir.as_ref().join(format!("{}{}", name, FILE_SUFFIX)), config)
    }

    /// Open the store at an explicit file path, writing `{}` there if the
    /// file does not exist yet. An existing file is never overwritten.
    pub fn open_path(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self> {
        let path = path.into();
        if config.create_dir {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }
        let created = document::init(&path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(file = %name, created, "DB created at {}", name);
        Ok(Store { path, name, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(key))
    }

    /// `None` when the key is missing; a stored `null` comes back as
    /// `Some(Value::Null)`.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut doc = self.load()?;
        let value = doc.remove(key);
        if value.is_none() {
            warn!(file = %self.name, "no [{}] in the database", key);
        }
        Ok(value)
    }

    /// Like [`Store::get`] but deserializes the value into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.get(key)?.map(serde_json::from_value).transpose()?)
    }

    /// Insert a new pair. An existing key is left alone and reported as
    /// [`Outcome::AlreadyExists`].
    pub fn add<V: Serialize>(&self, key: &str, value: V) -> Result<Outcome> {
        self.insert_new(key, serde_json::to_value(value)?)
    }

    /// Replace the value of `key`, or insert it exactly as [`Store::add`]
    /// would when it is missing.
    pub fn modify<V: Serialize>(&self, key: &str, value: V) -> Result<Outcome> {
        let value = serde_json::to_value(value)?;
        let mut doc = self.load()?;
        match doc.get_mut(key) {
            Some(slot) => {
                *slot = value;
                self.save(&doc)?;
                if self.config.verbose {
                    info!(file = %self.name, "the data {} has been modified successfully", key);
                }
                Ok(Outcome::Modified)
            }
            None => {
                debug!(file = %self.name, "modify on missing [{}], adding it", key);
                self.insert_new(key, value)
            }
        }
    }

    /// Delete `key`. A missing key is reported as [`Outcome::NotFound`].
    pub fn remove(&self, key: &str) -> Result<Outcome> {
        let mut doc = self.load()?;
        if doc.shift_remove(key).is_none() {
            warn!(file = %self.name, "no [{}] in the database", key);
            return Ok(Outcome::NotFound);
        }
        self.save(&doc)?;
        if self.config.verbose {
            info!(file = %self.name, "the data {} has been removed successfully", key);
        }
        Ok(Outcome::Removed)
    }

    /// All pairs in document order.
    pub fn dump(&self) -> Result<impl Iterator<Item = (String, Value)>> {
        Ok(self.load()?.into_iter())
    }

    /// Write every pair as a `key -> value` line.
    pub fn print_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for (key, value) in self.dump()? {
            writeln!(writer, "{} -> {}", key, value)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn print(&self) -> Result<()> {
        self.print_to(std::io::stdout().lock())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.load()?.is_empty())
    }

    fn insert_new(&self, key: &str, value: Value) -> Result<Outcome> {
        let mut doc = self.load()?;
        if doc.contains_key(key) {
            warn!(file = %self.name, "[{}] already exists in the database", key);
            return Ok(Outcome::AlreadyExists);
        }
        let shown = self.config.verbose.then(|| value.to_string());
        doc.insert(key.to_owned(), value);
        self.save(&doc)?;
        if let Some(shown) = shown {
            info!(file = %self.name, "the data ({} -> {}) has been added successfully", key, shown);
        }
        Ok(Outcome::Added)
    }

    fn load(&self) -> Result<Document> {
        document::load(&self.path)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        document::save(&self.path, doc, self.config.format())
    }
}
