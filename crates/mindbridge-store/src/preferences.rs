//! User preferences persisted as plain strings.

use std::sync::Arc;

use mindbridge_shared::constants::LANGUAGE_KEY;
use mindbridge_shared::Language;

use crate::error::Result;
use crate::storage::KeyValueStore;

pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved language, or English when nothing usable is stored.
    pub fn language(&self) -> Language {
        match self.store.get_item(LANGUAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored language preference");
                Language::default()
            }),
            Ok(None) => Language::default(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read language preference");
                Language::default()
            }
        }
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.store.set_item(LANGUAGE_KEY, language.code())
    }
}
