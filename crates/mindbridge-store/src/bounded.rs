use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::storage::KeyValueStore;

/// Ordered list persisted as a JSON array under one key, keeping only the
/// most recent `cap` items on disk.
pub(crate) struct BoundedList<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    cap: usize,
    items: Vec<T>,
}

impl<T> BoundedList<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the list stored under `key`. A missing, unreadable or corrupt value
    /// yields an empty list; the failure is logged, never returned.
    pub(crate) fn load(store: Arc<dyn KeyValueStore>, key: &'static str, cap: usize) -> Self {
        let items = match store.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!(key, error = %e, "corrupt stored list, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read stored list, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(key, count = items.len(), "loaded stored list");

        Self {
            store,
            key,
            cap,
            items,
        }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// The slice that gets written to storage.
    pub(crate) fn retained(&self) -> &[T] {
        let start = self.items.len().saturating_sub(self.cap);
        &self.items[start..]
    }

    /// Append and persist. Persist failures are logged, not returned.
    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
        if let Err(e) = self.persist() {
            tracing::error!(key = self.key, error = %e, "failed to persist stored list");
        }
    }

    /// Write the most recent `cap` items under the list's key.
    pub(crate) fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(self.retained())?;
        self.store.set_item(self.key, &json)
    }

    /// Drop items from the in-memory list that would not survive a reload.
    pub(crate) fn truncate_to_cap(&mut self) {
        let excess = self.items.len().saturating_sub(self.cap);
        if excess > 0 {
            self.items.drain(..excess);
        }
    }

    pub(crate) fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.store.remove_item(self.key)
    }
}
