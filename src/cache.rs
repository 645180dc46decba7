//! On-disk store for reading positions and last-opened times.
//!
//! Each document gets a directory under the cache root named by a hash of its
//! key, so arbitrary URIs never touch filesystem naming rules. Inside it,
//! `position.toml` holds the topmost visible page and `opened.toml` the time
//! the document was last opened.

use autoscroll_core::{PositionStore, SavedPosition, StoreError};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const POSITION_FILE: &str = "position.toml";
const OPENED_FILE: &str = "opened.toml";

#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct OpenedEntry {
    timestamp_millis: i64,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn hash_dir(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = format!("{:x}", hasher.finalize());
        self.root.join(hash)
    }

    fn write_entry<T: serde::Serialize>(
        &self,
        key: &str,
        file: &str,
        entry: &T,
    ) -> Result<(), StoreError> {
        let dir = self.hash_dir(key);
        fs::create_dir_all(&dir)?;
        let contents = toml::to_string(entry).map_err(|err| StoreError::Encode(err.to_string()))?;
        fs::write(dir.join(file), contents)?;
        Ok(())
    }

    fn read_entry<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        file: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.hash_dir(key).join(file);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        toml::from_str(&data)
            .map(Some)
            .map_err(|err| StoreError::Decode(format!("{}: {err}", path.display())))
    }
}

impl PositionStore for FileCache {
    fn save(&mut self, key: &str, position: SavedPosition) -> Result<(), StoreError> {
        self.write_entry(key, POSITION_FILE, &position)
    }

    fn get(&self, key: &str) -> Result<Option<SavedPosition>, StoreError> {
        self.read_entry(key, POSITION_FILE)
    }

    fn record_opened(&mut self, key: &str, timestamp_millis: i64) -> Result<(), StoreError> {
        self.write_entry(key, OPENED_FILE, &OpenedEntry { timestamp_millis })
    }

    fn last_opened(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self
            .read_entry::<OpenedEntry>(key, OPENED_FILE)?
            .map_or(0, |entry| entry.timestamp_millis))
    }
}
