//! Active training sessions.
//!
//! The trainer owns the in-memory session registry and wires pass
//! outcomes to the word store: unknown words from any finished pass land
//! on the persisted review list, and a converged review session removes
//! its mastered words from it. Sessions idle past [`SESSION_TTL`] are
//! swept by the cleanup worker.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fiszki_core::{
    deck, Judgement, Language, Level, Pass, Phase, ReviewSession, ReviewState,
    TranslationDirection, Word, WordCategory, DEFAULT_BLOCK_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::word_source::WordSource;
use crate::store::{ListKind, WordStore};

/// Idle time after which a session is swept from the registry.
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("session not found")]
    SessionNotFound,
    #[error("no words available to study")]
    EmptyDeck,
    #[error("no unknown words to review")]
    NothingToReview,
    #[error("the current pass is still in progress")]
    PassInProgress,
    #[error("no further blocks in this word list")]
    NoMoreBlocks,
    #[error("operation does not apply to this session mode")]
    WrongMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Generated,
    Custom,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseView {
    Presenting,
    Revealed,
    Complete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub front: String,
    /// The back of the card, present only while revealed or peeked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    pub flipped: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub index: usize,
    pub count: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub known_count: usize,
    pub unknown_words: Vec<Word>,
    /// Another block of the generated list can be started.
    pub can_continue: bool,
    /// A review session over this pass's unknown subset can be started.
    pub can_review: bool,
    /// Words confirmed mastered by a converged review session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered: Option<Vec<Word>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub mode: SessionMode,
    pub language: Language,
    pub direction: TranslationDirection,
    pub phase: PhaseView,
    pub position: usize,
    pub deck_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryView>,
}

enum Engine {
    Generated {
        words: Vec<Word>,
        block_index: usize,
        pass: Pass,
    },
    Custom {
        pass: Pass,
    },
    Review {
        review: ReviewSession,
    },
}

impl Engine {
    fn mode(&self) -> SessionMode {
        match self {
            Engine::Generated { .. } => SessionMode::Generated,
            Engine::Custom { .. } => SessionMode::Custom,
            Engine::Review { .. } => SessionMode::Review,
        }
    }

    fn pass(&self) -> &Pass {
        match self {
            Engine::Generated { pass, .. } => pass,
            Engine::Custom { pass } => pass,
            Engine::Review { review } => review.pass(),
        }
    }

    fn pass_mut(&mut self) -> &mut Pass {
        match self {
            Engine::Generated { pass, .. } => pass,
            Engine::Custom { pass } => pass,
            Engine::Review { review } => review.pass_mut(),
        }
    }
}

struct TrainingSession {
    language: Language,
    direction: TranslationDirection,
    engine: Engine,
    last_activity: DateTime<Utc>,
}

impl TrainingSession {
    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

pub struct Trainer {
    sessions: RwLock<HashMap<Uuid, TrainingSession>>,
    store: Arc<dyn WordStore>,
    word_source: Arc<WordSource>,
    block_size: usize,
}

impl Trainer {
    pub fn new(store: Arc<dyn WordStore>, word_source: Arc<WordSource>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            store,
            word_source,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    #[cfg(test)]
    fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Starts a session over a freshly generated word list, presenting
    /// its first block.
    pub async fn start_generated(
        &self,
        language: Language,
        level: Level,
        category: Option<WordCategory>,
        direction: TranslationDirection,
    ) -> SessionSnapshot {
        let words = self.word_source.generate(language, level, category).await;
        let first_block = deck::block(&words, 0, self.block_size).to_vec();
        let engine = Engine::Generated {
            words,
            block_index: 0,
            pass: Pass::new(first_block),
        };
        self.insert_session(language, direction, engine).await
    }

    /// Starts a single-pass session over the stored custom list.
    pub async fn start_custom(
        &self,
        language: Language,
        direction: TranslationDirection,
    ) -> Result<SessionSnapshot, TrainerError> {
        let words = self.store.get(language, ListKind::Custom);
        if words.is_empty() {
            return Err(TrainerError::EmptyDeck);
        }
        let engine = Engine::Custom {
            pass: Pass::new(words),
        };
        Ok(self.insert_session(language, direction, engine).await)
    }

    /// Starts a convergent review session over the persisted unknown
    /// list.
    pub async fn start_review(
        &self,
        language: Language,
        direction: TranslationDirection,
    ) -> Result<SessionSnapshot, TrainerError> {
        let words = self.store.get(language, ListKind::Unknown);
        if words.is_empty() {
            return Err(TrainerError::NothingToReview);
        }
        let engine = Engine::Review {
            review: ReviewSession::new(words),
        };
        Ok(self.insert_session(language, direction, engine).await)
    }

    async fn insert_session(
        &self,
        language: Language,
        direction: TranslationDirection,
        engine: Engine,
    ) -> SessionSnapshot {
        let id = Uuid::new_v4();
        let session = TrainingSession {
            language,
            direction,
            engine,
            last_activity: Utc::now(),
        };
        let snapshot = self.snapshot_of(id, &session);
        self.sessions.write().await.insert(id, session);
        debug!(session_id = %id, mode = ?snapshot.mode, %language, "session started");
        snapshot
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();
        Ok(self.snapshot_of(id, session))
    }

    /// Records a judgement for the current card. A judgement submitted
    /// while one is already pending is ignored, not an error.
    pub async fn judge(&self, id: Uuid, known: bool) -> Result<SessionSnapshot, TrainerError> {
        let judgement = if known {
            Judgement::Known
        } else {
            Judgement::Unknown
        };
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();
        session.engine.pass_mut().judge(judgement);
        Ok(self.snapshot_of(id, session))
    }

    /// Toggles the manual peek flip; ignored while a judgement is
    /// pending.
    pub async fn flip(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();
        session.engine.pass_mut().toggle_peek();
        Ok(self.snapshot_of(id, session))
    }

    /// Moves past a revealed card. Completing a pass persists its
    /// unknown subset; completing a review pass with no unknowns
    /// converges the session and clears the mastered words from the
    /// persisted review list.
    pub async fn advance(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();

        let advanced = session.engine.pass_mut().advance();
        if advanced && session.engine.pass().is_complete() {
            self.handle_pass_completion(id, session);
        }
        Ok(self.snapshot_of(id, session))
    }

    fn handle_pass_completion(&self, id: Uuid, session: &mut TrainingSession) {
        match &mut session.engine {
            Engine::Generated { pass, .. } | Engine::Custom { pass } => {
                let unknown = pass.unknown();
                if !unknown.is_empty() {
                    self.store
                        .add(session.language, ListKind::Unknown, unknown);
                }
                info!(
                    session_id = %id,
                    known = pass.known().len(),
                    unknown = unknown.len(),
                    "pass completed"
                );
            }
            Engine::Review { review } => {
                if review.pass().unknown().is_empty() {
                    let state = review.advance_round(&mut rand::rng());
                    debug_assert_eq!(state, ReviewState::Converged);
                    let mastered = review.mastered().unwrap_or_default().to_vec();
                    self.store
                        .remove(session.language, ListKind::Unknown, &mastered);
                    info!(
                        session_id = %id,
                        mastered = mastered.len(),
                        rounds = review.round(),
                        "review session converged"
                    );
                } else {
                    info!(
                        session_id = %id,
                        round = review.round(),
                        remaining = review.pass().unknown().len(),
                        "review pass completed"
                    );
                }
            }
        }
    }

    /// Starts the next review pass over the re-shuffled unknown subset
    /// of the completed one.
    pub async fn next_round(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();

        let Engine::Review { review } = &mut session.engine else {
            return Err(TrainerError::WrongMode);
        };
        if review.is_converged() {
            return Err(TrainerError::NothingToReview);
        }
        if !review.pass().is_complete() {
            return Err(TrainerError::PassInProgress);
        }
        review.advance_round(&mut rand::rng());
        Ok(self.snapshot_of(id, session))
    }

    /// Starts the next block of a generated list after its pass
    /// completed.
    pub async fn next_block(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();

        let block_size = self.block_size;
        let Engine::Generated {
            words,
            block_index,
            pass,
        } = &mut session.engine
        else {
            return Err(TrainerError::WrongMode);
        };
        if !pass.is_complete() {
            return Err(TrainerError::PassInProgress);
        }
        if !deck::has_more_blocks(words.len(), *block_index, block_size) {
            return Err(TrainerError::NoMoreBlocks);
        }
        *block_index += 1;
        *pass = Pass::new(deck::block(words, *block_index, block_size).to_vec());
        Ok(self.snapshot_of(id, session))
    }

    /// Branches a completed generated/custom pass into a review session
    /// over exactly its unknown subset.
    pub async fn review_unknown(&self, id: Uuid) -> Result<SessionSnapshot, TrainerError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(TrainerError::SessionNotFound)?;
        session.touch();

        let pass = match &session.engine {
            Engine::Generated { pass, .. } | Engine::Custom { pass } => pass,
            Engine::Review { .. } => return Err(TrainerError::WrongMode),
        };
        if !pass.is_complete() {
            return Err(TrainerError::PassInProgress);
        }
        let unknown = pass.unknown().to_vec();
        if unknown.is_empty() {
            return Err(TrainerError::NothingToReview);
        }
        session.engine = Engine::Review {
            review: ReviewSession::new(unknown),
        };
        Ok(self.snapshot_of(id, session))
    }

    pub async fn discard(&self, id: Uuid) -> Result<(), TrainerError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(TrainerError::SessionNotFound)
    }

    /// Drops sessions idle longer than `ttl`; returns how many went.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(0));
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_activity >= cutoff);
        before - sessions.len()
    }

    fn snapshot_of(&self, id: Uuid, session: &TrainingSession) -> SessionSnapshot {
        let pass = session.engine.pass();
        let direction = session.direction;

        let phase = match pass.phase() {
            Phase::Presenting { .. } => PhaseView::Presenting,
            Phase::Revealed { .. } => PhaseView::Revealed,
            Phase::Complete => PhaseView::Complete,
        };

        let card = pass.current().map(|word| {
            let show_back = match pass.phase() {
                Phase::Revealed { .. } => true,
                Phase::Presenting { peeked } => peeked,
                Phase::Complete => false,
            };
            CardView {
                front: direction.front(word).to_string(),
                back: show_back.then(|| direction.back(word).to_string()),
                flipped: show_back,
            }
        });

        let block = match &session.engine {
            Engine::Generated {
                words, block_index, ..
            } => Some(BlockView {
                index: *block_index,
                count: deck::block_count(words.len(), self.block_size),
                has_more: deck::has_more_blocks(words.len(), *block_index, self.block_size),
            }),
            _ => None,
        };

        let round = match &session.engine {
            Engine::Review { review } => Some(review.round()),
            _ => None,
        };

        let summary = pass.outcome().map(|outcome| {
            let can_continue = block.as_ref().is_some_and(|b| b.has_more);
            let can_review = match session.engine.mode() {
                SessionMode::Review => false,
                _ => !outcome.unknown.is_empty(),
            };
            let mastered = match &session.engine {
                Engine::Review { review } => review.mastered().map(|words| words.to_vec()),
                _ => None,
            };
            SummaryView {
                known_count: outcome.known.len(),
                unknown_words: outcome.unknown,
                can_continue,
                can_review,
                mastered,
            }
        });

        SessionSnapshot {
            session_id: id,
            mode: session.engine.mode(),
            language: session.language,
            direction,
            phase,
            position: pass.position(),
            deck_size: pass.len(),
            card,
            block,
            round,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::word_source::{WordSource, WordSourceConfig};
    use crate::store::MemoryStore;

    fn trainer_with(store: Arc<MemoryStore>) -> Trainer {
        let word_source = Arc::new(WordSource::new(WordSourceConfig {
            mock: true,
            ..WordSourceConfig::default()
        }));
        Trainer::new(store, word_source)
    }

    async fn run_pass(trainer: &Trainer, id: Uuid, judge: impl Fn(&str) -> bool) {
        loop {
            let snapshot = trainer.snapshot(id).await.unwrap();
            let Some(card) = snapshot.card else { break };
            trainer.judge(id, judge(&card.front)).await.unwrap();
            trainer.advance(id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn custom_session_persists_unknown_words() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            Language::English,
            ListKind::Custom,
            &[Word::new("dog", "pies"), Word::new("cat", "kot")],
        );
        let trainer = trainer_with(Arc::clone(&store));

        let snapshot = trainer
            .start_custom(Language::English, TranslationDirection::ForeignToPolish)
            .await
            .unwrap();
        assert_eq!(snapshot.mode, SessionMode::Custom);
        assert!(snapshot.block.is_none());

        run_pass(&trainer, snapshot.session_id, |front| front == "cat").await;

        let summary = trainer
            .snapshot(snapshot.session_id)
            .await
            .unwrap()
            .summary
            .unwrap();
        assert_eq!(summary.known_count, 1);
        assert_eq!(summary.unknown_words, vec![Word::new("dog", "pies")]);
        assert!(!summary.can_continue);
        assert!(summary.can_review);

        assert_eq!(
            store.get(Language::English, ListKind::Unknown),
            vec![Word::new("dog", "pies")]
        );
    }

    #[tokio::test]
    async fn custom_session_requires_stored_words() {
        let trainer = trainer_with(Arc::new(MemoryStore::new()));
        let err = trainer
            .start_custom(Language::English, TranslationDirection::ForeignToPolish)
            .await
            .unwrap_err();
        assert!(matches!(err, TrainerError::EmptyDeck));
    }

    #[tokio::test]
    async fn generated_session_serves_blocks_from_the_mock_list() {
        let store = Arc::new(MemoryStore::new());
        let trainer = trainer_with(Arc::clone(&store)).with_block_size(3);

        let snapshot = trainer
            .start_generated(
                Language::English,
                Level::A1,
                None,
                TranslationDirection::ForeignToPolish,
            )
            .await;
        // The mock source serves the 5-word fallback list.
        let block = snapshot.block.clone().unwrap();
        assert_eq!(block.count, 2);
        assert_eq!(snapshot.deck_size, 3);
        assert!(block.has_more);

        run_pass(&trainer, snapshot.session_id, |_| true).await;
        let summary = trainer
            .snapshot(snapshot.session_id)
            .await
            .unwrap()
            .summary
            .unwrap();
        assert!(summary.can_continue);

        let next = trainer.next_block(snapshot.session_id).await.unwrap();
        assert_eq!(next.block.unwrap().index, 1);
        assert_eq!(next.deck_size, 2);

        run_pass(&trainer, snapshot.session_id, |_| true).await;
        let err = trainer.next_block(snapshot.session_id).await.unwrap_err();
        assert!(matches!(err, TrainerError::NoMoreBlocks));
    }

    #[tokio::test]
    async fn review_session_converges_and_clears_the_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            Language::Spanish,
            ListKind::Unknown,
            &[Word::new("ser", "być"), Word::new("ir", "iść")],
        );
        let trainer = trainer_with(Arc::clone(&store));

        let snapshot = trainer
            .start_review(Language::Spanish, TranslationDirection::ForeignToPolish)
            .await
            .unwrap();
        assert_eq!(snapshot.mode, SessionMode::Review);
        assert_eq!(snapshot.round, Some(1));

        // Round 1: "ser" still unknown.
        run_pass(&trainer, snapshot.session_id, |front| front != "ser").await;
        let mid = trainer.snapshot(snapshot.session_id).await.unwrap();
        assert_eq!(mid.summary.unwrap().unknown_words.len(), 1);
        assert_eq!(
            store.get(Language::Spanish, ListKind::Unknown).len(),
            2,
            "nothing is removed before convergence"
        );

        let round2 = trainer.next_round(snapshot.session_id).await.unwrap();
        assert_eq!(round2.round, Some(2));

        // Round 2: everything known; the session converges.
        run_pass(&trainer, snapshot.session_id, |_| true).await;
        let done = trainer.snapshot(snapshot.session_id).await.unwrap();
        let summary = done.summary.unwrap();
        assert_eq!(summary.mastered, Some(vec![Word::new("ser", "być")]));

        // Only the word confirmed by the final all-known pass leaves the
        // store; "ir" dropped out of rotation in round 1 and stays.
        assert_eq!(
            store.get(Language::Spanish, ListKind::Unknown),
            vec![Word::new("ir", "iść")]
        );
    }

    #[tokio::test]
    async fn completed_pass_can_branch_into_review() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            Language::English,
            ListKind::Custom,
            &[Word::new("dog", "pies")],
        );
        let trainer = trainer_with(Arc::clone(&store));

        let snapshot = trainer
            .start_custom(Language::English, TranslationDirection::ForeignToPolish)
            .await
            .unwrap();

        let err = trainer.review_unknown(snapshot.session_id).await.unwrap_err();
        assert!(matches!(err, TrainerError::PassInProgress));

        run_pass(&trainer, snapshot.session_id, |_| false).await;
        let review = trainer.review_unknown(snapshot.session_id).await.unwrap();
        assert_eq!(review.mode, SessionMode::Review);
        assert_eq!(review.deck_size, 1);
    }

    #[tokio::test]
    async fn double_judgement_does_not_double_record() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            Language::English,
            ListKind::Custom,
            &[Word::new("dog", "pies")],
        );
        let trainer = trainer_with(store);

        let snapshot = trainer
            .start_custom(Language::English, TranslationDirection::ForeignToPolish)
            .await
            .unwrap();
        trainer.judge(snapshot.session_id, false).await.unwrap();
        let second = trainer.judge(snapshot.session_id, true).await.unwrap();
        assert_eq!(second.phase, PhaseView::Revealed);

        trainer.advance(snapshot.session_id).await.unwrap();
        let summary = trainer
            .snapshot(snapshot.session_id)
            .await
            .unwrap()
            .summary
            .unwrap();
        assert_eq!(summary.known_count, 0);
        assert_eq!(summary.unknown_words.len(), 1);
    }

    #[tokio::test]
    async fn idle_sessions_are_swept() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            Language::English,
            ListKind::Custom,
            &[Word::new("dog", "pies")],
        );
        let trainer = trainer_with(store);
        let snapshot = trainer
            .start_custom(Language::English, TranslationDirection::ForeignToPolish)
            .await
            .unwrap();

        assert_eq!(trainer.sweep_idle(Duration::from_secs(60)).await, 0);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(trainer.sweep_idle(Duration::from_secs(0)).await, 1);
        let err = trainer.snapshot(snapshot.session_id).await.unwrap_err();
        assert!(matches!(err, TrainerError::SessionNotFound));
    }
}
