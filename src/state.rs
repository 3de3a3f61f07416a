use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::services::trainer::Trainer;
use crate::services::word_source::WordSource;
use crate::store::WordStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    store: Arc<dyn WordStore>,
    word_source: Arc<WordSource>,
    trainer: Arc<Trainer>,
}

impl AppState {
    pub fn new(store: Arc<dyn WordStore>, word_source: Arc<WordSource>) -> Self {
        let trainer = Arc::new(Trainer::new(Arc::clone(&store), Arc::clone(&word_source)));
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            store,
            word_source,
            trainer,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn store(&self) -> Arc<dyn WordStore> {
        Arc::clone(&self.store)
    }

    pub fn word_source(&self) -> Arc<WordSource> {
        Arc::clone(&self.word_source)
    }

    pub fn trainer(&self) -> Arc<Trainer> {
        Arc::clone(&self.trainer)
    }
}
