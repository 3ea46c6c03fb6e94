//! Persisted chat transcript.

use std::sync::Arc;

use mindbridge_shared::constants::{CHAT_HISTORY_KEY, MAX_CHAT_HISTORY};
use mindbridge_shared::MessageRecord;

use crate::bounded::BoundedList;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Insertion-ordered chat history.
///
/// The in-memory list grows for the lifetime of the session; storage only
/// ever holds the most recent [`MAX_CHAT_HISTORY`] records.
pub struct ChatHistory {
    list: BoundedList<MessageRecord>,
}

impl ChatHistory {
    /// Load history from `store`. Corrupt data is discarded and logged.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            list: BoundedList::load(store, CHAT_HISTORY_KEY, MAX_CHAT_HISTORY),
        }
    }

    /// Append a record and persist the most recent 50.
    pub fn append(&mut self, record: MessageRecord) {
        self.list.push(record);
    }

    pub fn records(&self) -> &[MessageRecord] {
        self.list.items()
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[MessageRecord] {
        let records = self.list.items();
        &records[records.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.list.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.items().is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.list.clear()
    }
}
