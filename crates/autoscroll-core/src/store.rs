//! Reading-position persistence.
//!
//! [`PositionStore`] is the storage collaborator; [`PositionBridge`] wraps it
//! so that storage failures are logged and swallowed instead of reaching the
//! session.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Topmost visible item and the pixel offset into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedPosition {
    pub item_index: usize,
    pub pixel_offset: i32,
}

pub trait PositionStore {
    fn save(&mut self, key: &str, position: SavedPosition) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<SavedPosition>, StoreError>;
    fn record_opened(&mut self, key: &str, timestamp_millis: i64) -> Result<(), StoreError>;
    /// Last-opened timestamp; `0` for documents never opened.
    fn last_opened(&self, key: &str) -> Result<i64, StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPositionStore {
    positions: HashMap<String, SavedPosition>,
    opened: HashMap<String, i64>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryPositionStore {
    fn save(&mut self, key: &str, position: SavedPosition) -> Result<(), StoreError> {
        self.positions.insert(key.to_string(), position);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<SavedPosition>, StoreError> {
        Ok(self.positions.get(key).copied())
    }

    fn record_opened(&mut self, key: &str, timestamp_millis: i64) -> Result<(), StoreError> {
        self.opened.insert(key.to_string(), timestamp_millis);
        Ok(())
    }

    fn last_opened(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self.opened.get(key).copied().unwrap_or(0))
    }
}

/// Fire-and-forget facade over a [`PositionStore`].
#[derive(Debug)]
pub struct PositionBridge<S> {
    store: S,
}

impl<S: PositionStore> PositionBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn save(&mut self, key: &str, position: SavedPosition) {
        match self.store.save(key, position) {
            Ok(()) => debug!(
                key,
                index = position.item_index,
                offset = position.pixel_offset,
                "Saved reading position"
            ),
            Err(err) => warn!(key, "Failed to save reading position: {err}"),
        }
    }

    pub fn restore(&self, key: &str) -> Option<SavedPosition> {
        match self.store.get(key) {
            Ok(saved) => saved,
            Err(err) => {
                warn!(key, "Failed to read reading position: {err}");
                None
            }
        }
    }

    pub fn record_opened(&mut self, key: &str, timestamp_millis: i64) {
        if let Err(err) = self.store.record_opened(key, timestamp_millis) {
            warn!(key, "Failed to record last-opened time: {err}");
        }
    }

    pub fn last_opened(&self, key: &str) -> i64 {
        self.store.last_opened(key).unwrap_or_else(|err| {
            warn!(key, "Failed to read last-opened time: {err}");
            0
        })
    }

    /// Most recently opened first; ties keep their incoming order.
    pub fn order_by_recent(&self, keys: Vec<String>) -> Vec<String> {
        let mut stamped: Vec<(i64, String)> = keys
            .into_iter()
            .map(|key| (self.last_opened(&key), key))
            .collect();
        stamped.sort_by_key(|(opened, _)| Reverse(*opened));
        stamped.into_iter().map(|(_, key)| key).collect()
    }
}
