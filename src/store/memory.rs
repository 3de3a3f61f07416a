use std::collections::HashMap;

use fiszki_core::{Language, Word};
use parking_lot::RwLock;

use super::{dedup, ListKind, WordStore};

/// In-memory store with the same de-dup semantics as the file store.
#[derive(Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<String, Vec<Word>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordStore for MemoryStore {
    fn get(&self, language: Language, kind: ListKind) -> Vec<Word> {
        self.lists
            .read()
            .get(&kind.storage_key(language))
            .cloned()
            .unwrap_or_default()
    }

    fn set(&self, language: Language, kind: ListKind, words: &[Word]) {
        self.lists
            .write()
            .insert(kind.storage_key(language), dedup(kind, words));
    }
}
