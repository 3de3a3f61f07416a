//! # fiszki-core
//!
//! Pure flashcard-trainer logic, free of I/O and async:
//!
//! - [`session`] - the pass state machine and convergent multi-pass review
//! - [`deck`] - fixed-size block slicing over generated word lists
//! - [`import`] - the bulk word-list text parser
//! - [`types`] - words, languages, levels, categories, directions

pub mod deck;
pub mod import;
pub mod session;
pub mod types;

pub use deck::{block, block_count, has_more_blocks, DEFAULT_BLOCK_SIZE};
pub use import::parse_word_list;
pub use session::{Judgement, Pass, PassOutcome, Phase, ReviewSession, ReviewState};
pub use types::{Language, Level, TranslationDirection, Word, WordCategory};
