//! Word-list persistence.
//!
//! Two independent lists per language: the unknown (needs-review) list,
//! mutated by session outcomes, and the user-authored custom list. Both
//! are stored wholesale as JSON word arrays under string keys, and both
//! de-duplicate by the word's surface form on every write — the unknown
//! list by exact match, the custom list case-insensitively. The asymmetry
//! is inherited from the original application and kept as-is.
//!
//! Store failures never reach callers: unreadable data reads as an empty
//! list and failed writes are dropped, both logged.

mod json_file;
mod memory;

use std::collections::HashMap;
use std::sync::Arc;

use fiszki_core::{Language, Word};

use crate::config::{Config, StoreBackend};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

const UNKNOWN_WORDS_PREFIX: &str = "unknown_words_";
const CUSTOM_WORDS_PREFIX: &str = "custom_words_";

/// Which of the two per-language lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Unknown,
    Custom,
}

impl ListKind {
    pub fn storage_key(&self, language: Language) -> String {
        let prefix = match self {
            ListKind::Unknown => UNKNOWN_WORDS_PREFIX,
            ListKind::Custom => CUSTOM_WORDS_PREFIX,
        };
        format!("{prefix}{}", language.id())
    }

    /// De-duplication key for a word in this list.
    fn dedup_key(&self, word: &Word) -> String {
        match self {
            ListKind::Unknown => word.text.clone(),
            ListKind::Custom => word.text.to_lowercase(),
        }
    }
}

/// Key-value word-list store, injected into the rest of the backend so
/// alternate backends swap in without touching session logic.
pub trait WordStore: Send + Sync {
    /// The stored list; empty when the key is missing or unreadable.
    fn get(&self, language: Language, kind: ListKind) -> Vec<Word>;

    /// De-duplicates by key, then overwrites the stored list wholesale.
    fn set(&self, language: Language, kind: ListKind, words: &[Word]);

    /// Read-merge-write; duplicate keys resolve to the newest entry.
    fn add(&self, language: Language, kind: ListKind, new_words: &[Word]) {
        let mut words = self.get(language, kind);
        words.extend_from_slice(new_words);
        self.set(language, kind, &words);
    }

    /// Read-filter-write, dropping every stored word whose key matches a
    /// key in `to_remove`.
    fn remove(&self, language: Language, kind: ListKind, to_remove: &[Word]) {
        let keys: Vec<String> = to_remove.iter().map(|w| kind.dedup_key(w)).collect();
        let remaining: Vec<Word> = self
            .get(language, kind)
            .into_iter()
            .filter(|word| !keys.contains(&kind.dedup_key(word)))
            .collect();
        self.set(language, kind, &remaining);
    }
}

pub fn from_config(config: &Config) -> Arc<dyn WordStore> {
    match config.store_backend {
        StoreBackend::Json => Arc::new(JsonFileStore::new(config.data_dir.clone())),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

/// Last write wins; the surviving entry keeps the position of the first
/// occurrence of its key, matching the original's Map-based de-dup.
fn dedup(kind: ListKind, words: &[Word]) -> Vec<Word> {
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Word> = Vec::with_capacity(words.len());
    for word in words {
        let key = kind.dedup_key(word);
        match by_key.get(&key) {
            Some(&index) => result[index] = word.clone(),
            None => {
                by_key.insert(key, result.len());
                result.push(word.clone());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_prefixed_by_list_and_language() {
        assert_eq!(
            ListKind::Unknown.storage_key(Language::English),
            "unknown_words_english"
        );
        assert_eq!(
            ListKind::Custom.storage_key(Language::Spanish),
            "custom_words_spanish"
        );
    }

    #[test]
    fn dedup_is_last_write_wins_at_first_position() {
        let words = vec![
            Word::new("dog", "pies"),
            Word::new("cat", "kot"),
            Word::new("dog", "suka"),
        ];
        assert_eq!(
            dedup(ListKind::Unknown, &words),
            vec![Word::new("dog", "suka"), Word::new("cat", "kot")]
        );
    }

    #[test]
    fn unknown_list_keys_are_case_sensitive() {
        let words = vec![Word::new("Dog", "pies"), Word::new("dog", "pies")];
        assert_eq!(dedup(ListKind::Unknown, &words).len(), 2);
    }

    #[test]
    fn custom_list_keys_are_case_insensitive() {
        let words = vec![Word::new("Dog", "pies"), Word::new("dog", "piesek")];
        assert_eq!(
            dedup(ListKind::Custom, &words),
            vec![Word::new("dog", "piesek")]
        );
    }

    #[test]
    fn remove_matches_by_key_only() {
        let store = MemoryStore::new();
        store.set(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "pies"), Word::new("cat", "kot")],
        );
        // The translation on the removal probe is irrelevant.
        store.remove(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "")],
        );
        assert_eq!(
            store.get(Language::English, ListKind::Unknown),
            vec![Word::new("cat", "kot")]
        );
    }

    #[test]
    fn add_overwrites_existing_keys_without_duplicating() {
        let store = MemoryStore::new();
        store.set(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "pies")],
        );
        store.add(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "piesek"), Word::new("cat", "kot")],
        );
        assert_eq!(
            store.get(Language::English, ListKind::Unknown),
            vec![Word::new("dog", "piesek"), Word::new("cat", "kot")]
        );
    }

    #[test]
    fn lists_are_independent_per_kind_and_language() {
        let store = MemoryStore::new();
        store.set(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "pies")],
        );
        store.set(
            Language::English,
            ListKind::Custom,
            &[Word::new("house", "dom")],
        );
        store.remove(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "pies")],
        );

        assert!(store.get(Language::English, ListKind::Unknown).is_empty());
        assert_eq!(
            store.get(Language::English, ListKind::Custom),
            vec![Word::new("house", "dom")]
        );
        assert!(store.get(Language::Spanish, ListKind::Custom).is_empty());
    }

    #[test]
    fn set_empty_clears_the_list() {
        let store = MemoryStore::new();
        store.set(
            Language::English,
            ListKind::Unknown,
            &[Word::new("dog", "pies")],
        );
        store.set(Language::English, ListKind::Unknown, &[]);
        assert!(store.get(Language::English, ListKind::Unknown).is_empty());
    }
}
