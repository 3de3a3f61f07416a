//! Bulk word-list parsing.
//!
//! Freeform text, one entry per line, the two fields separated by a
//! comma, semicolon or hyphen. Lines that do not split into exactly two
//! non-empty fields are discarded; the caller decides whether an import
//! that yields nothing is an error.

use crate::types::Word;

const SEPARATORS: [char; 3] = [',', ';', '-'];

/// Parses bulk-import text into words, silently dropping invalid lines.
pub fn parse_word_list(text: &str) -> Vec<Word> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<Word> {
    let parts: Vec<&str> = line.split(SEPARATORS).map(str::trim).collect();
    match parts.as_slice() {
        [text, translation] if !text.is_empty() && !translation.is_empty() => {
            Some(Word::new(*text, *translation))
        }
        _ => None,
    }
}
