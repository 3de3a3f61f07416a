//! The review-pass state machine.
//!
//! One [`Pass`] walks a fixed deck card by card: each card is presented,
//! judged known or unknown exactly once, revealed, and advanced past. The
//! legal transitions are encoded in [`Phase`], so a pending judgement
//! cannot be submitted twice and a card cannot be peeked mid-reveal.
//!
//! [`ReviewSession`] chains passes over the shrinking unknown subset until
//! a pass completes with every card known.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Word;

/// Per-card self-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Known,
    Unknown,
}

/// Where a pass currently stands.
///
/// `Presenting` shows the front of the current card; `peeked` tracks the
/// manual flip, which never touches the accumulators. `Revealed` holds the
/// recorded judgement until the driver advances past the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Presenting { peeked: bool },
    Revealed { judgement: Judgement },
    Complete,
}

/// The known/unknown partition of a finished pass, in judgement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    pub known: Vec<Word>,
    pub unknown: Vec<Word>,
}

/// One traversal of a deck from first to last card.
#[derive(Debug, Clone)]
pub struct Pass {
    deck: Vec<Word>,
    cursor: usize,
    phase: Phase,
    known: Vec<Word>,
    unknown: Vec<Word>,
}

impl Pass {
    /// Starts a pass over `deck`. An empty deck completes immediately
    /// with an empty outcome and no card to render.
    pub fn new(deck: Vec<Word>) -> Self {
        let phase = if deck.is_empty() {
            Phase::Complete
        } else {
            Phase::Presenting { peeked: false }
        };
        Self {
            deck,
            cursor: 0,
            phase,
            known: Vec::new(),
            unknown: Vec::new(),
        }
    }

    pub fn deck(&self) -> &[Word] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Zero-based index of the card currently in play.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&Word> {
        match self.phase {
            Phase::Complete => None,
            _ => self.deck.get(self.cursor),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }

    /// Records a judgement for the current card and reveals it.
    ///
    /// Returns `false` without effect while a judgement is already
    /// pending or after the pass has completed.
    pub fn judge(&mut self, judgement: Judgement) -> bool {
        let Phase::Presenting { .. } = self.phase else {
            return false;
        };
        let card = self.deck[self.cursor].clone();
        match judgement {
            Judgement::Known => self.known.push(card),
            Judgement::Unknown => self.unknown.push(card),
        }
        self.phase = Phase::Revealed { judgement };
        true
    }

    /// Manually flips the current card to peek at the back. Only legal
    /// while no judgement is pending; accumulators are untouched.
    pub fn toggle_peek(&mut self) -> bool {
        let Phase::Presenting { peeked } = self.phase else {
            return false;
        };
        self.phase = Phase::Presenting { peeked: !peeked };
        true
    }

    /// Moves past a revealed card to the next one, or completes the pass
    /// on deck exhaustion. Returns `false` unless a judgement is pending.
    pub fn advance(&mut self) -> bool {
        let Phase::Revealed { .. } = self.phase else {
            return false;
        };
        self.cursor += 1;
        self.phase = if self.cursor < self.deck.len() {
            Phase::Presenting { peeked: false }
        } else {
            Phase::Complete
        };
        true
    }

    pub fn known(&self) -> &[Word] {
        &self.known
    }

    pub fn unknown(&self) -> &[Word] {
        &self.unknown
    }

    /// The final partition, available once the pass is complete.
    pub fn outcome(&self) -> Option<PassOutcome> {
        if !self.is_complete() {
            return None;
        }
        Some(PassOutcome {
            known: self.known.clone(),
            unknown: self.unknown.clone(),
        })
    }
}

/// Whether a review session still has passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    InProgress,
    Converged,
}

/// Convergent multi-pass review over an unknown set.
///
/// Each completed pass either converges (zero unknowns remain, the pass's
/// known words are the mastered set) or seeds the next pass with its
/// re-shuffled unknown subset. A word counts as mastered only when it is
/// answered known in a pass where every other card is also known.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    pass: Pass,
    round: usize,
    mastered: Option<Vec<Word>>,
}

impl ReviewSession {
    /// Starts reviewing `unknown_words`. The first pass presents the set
    /// as given; later passes shuffle.
    pub fn new(unknown_words: Vec<Word>) -> Self {
        Self {
            pass: Pass::new(unknown_words),
            round: 1,
            mastered: None,
        }
    }

    pub fn pass(&self) -> &Pass {
        &self.pass
    }

    pub fn pass_mut(&mut self) -> &mut Pass {
        &mut self.pass
    }

    /// One-based pass counter.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn is_converged(&self) -> bool {
        self.mastered.is_some()
    }

    /// Words confirmed known by the final all-known pass, once converged.
    pub fn mastered(&self) -> Option<&[Word]> {
        self.mastered.as_deref()
    }

    /// Advances to the next pass after the current one completes.
    ///
    /// No-op (`InProgress`) while the current pass is still running.
    pub fn advance_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ReviewState {
        if self.is_converged() {
            return ReviewState::Converged;
        }
        let Some(outcome) = self.pass.outcome() else {
            return ReviewState::InProgress;
        };
        if outcome.unknown.is_empty() {
            self.mastered = Some(outcome.known);
            return ReviewState::Converged;
        }
        let mut next_deck = outcome.unknown;
        next_deck.shuffle(rng);
        self.pass = Pass::new(next_deck);
        self.round += 1;
        ReviewState::InProgress
    }
}
