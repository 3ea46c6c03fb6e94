//! Persisted mood selections from the check-in form.

use std::sync::Arc;

use mindbridge_shared::constants::{MAX_MOOD_HISTORY, MOOD_HISTORY_KEY};
use mindbridge_shared::{MoodEntry, MoodValue};

use crate::bounded::BoundedList;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// The most recent [`MAX_MOOD_HISTORY`] mood entries, oldest first.
pub struct MoodHistory {
    list: BoundedList<MoodEntry>,
}

impl MoodHistory {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut list = BoundedList::load(store, MOOD_HISTORY_KEY, MAX_MOOD_HISTORY);
        list.truncate_to_cap();
        Self { list }
    }

    /// Record a mood selection dated now.
    pub fn track(&mut self, mood: MoodValue) -> MoodEntry {
        self.push(MoodEntry::now(mood))
    }

    /// Record an entry with an explicit date (imports, tests).
    pub fn push(&mut self, entry: MoodEntry) -> MoodEntry {
        self.list.push(entry.clone());
        self.list.truncate_to_cap();
        tracing::debug!(mood = %entry.mood, date = %entry.date, "mood tracked");
        entry
    }

    pub fn entries(&self) -> &[MoodEntry] {
        self.list.items()
    }

    /// Mood values in chronological order.
    pub fn moods(&self) -> Vec<u8> {
        self.list.items().iter().map(|e| e.mood.get()).collect()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.list.clear()
    }
}
