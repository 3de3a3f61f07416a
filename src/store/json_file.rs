use std::io::ErrorKind;
use std::path::PathBuf;

use fiszki_core::{Language, Word};
use parking_lot::RwLock;
use tracing::warn;

use super::{dedup, ListKind, WordStore};

/// File-backed store: one `<key>.json` per list under the data directory.
///
/// There is exactly one logical writer (the single-user trainer); the
/// lock only serializes overlapping HTTP handlers.
pub struct JsonFileStore {
    root: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Self {
        if let Err(err) = std::fs::create_dir_all(&root) {
            warn!(error = %err, dir = %root.display(), "failed to create data directory");
        }
        Self {
            root,
            lock: RwLock::new(()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl WordStore for JsonFileStore {
    fn get(&self, language: Language, kind: ListKind) -> Vec<Word> {
        let key = kind.storage_key(language);
        let path = self.path_for(&key);

        let _guard = self.lock.read();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(error = %err, %key, "failed to read word list");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(words) => words,
            Err(err) => {
                warn!(error = %err, %key, "stored word list is corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn set(&self, language: Language, kind: ListKind, words: &[Word]) {
        let key = kind.storage_key(language);
        let path = self.path_for(&key);
        let unique = dedup(kind, words);

        let payload = match serde_json::to_vec(&unique) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, %key, "failed to serialize word list");
                return;
            }
        };

        let _guard = self.lock.write();
        if let Err(err) = std::fs::write(&path, payload) {
            warn!(error = %err, %key, "failed to write word list");
        }
    }
}
