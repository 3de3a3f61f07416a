use serde::{Deserialize, Serialize};
use std::fmt;

/// A single vocabulary entry. The wire format keeps the original JSON
/// field name `word` for the foreign surface form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub translation: String,
}

impl Word {
    pub fn new(text: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translation: translation.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// Stable identifier used in persistence keys and URLs.
    pub fn id(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
        }
    }

    /// Polish display name, used verbatim in generation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "Angielski",
            Language::Spanish => "Hiszpański",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" => Some(Language::English),
            "spanish" => Some(Language::Spanish),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// CEFR difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "A1",
            Level::A2 => "A2",
            Level::B1 => "B1",
            Level::B2 => "B2",
            Level::C1 => "C1",
            Level::C2 => "C2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part-of-speech category for generated word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCategory {
    Noun,
    Adjective,
    Verb,
    Numeral,
    Pronoun,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Particle,
}

impl WordCategory {
    /// Polish category name, used verbatim in generation prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            WordCategory::Noun => "Rzeczowniki",
            WordCategory::Adjective => "Przymiotniki",
            WordCategory::Verb => "Czasowniki",
            WordCategory::Numeral => "Liczebniki",
            WordCategory::Pronoun => "Zaimki",
            WordCategory::Adverb => "Przysłówki",
            WordCategory::Preposition => "Przyimki",
            WordCategory::Conjunction => "Spójniki",
            WordCategory::Interjection => "Wykrzykniki",
            WordCategory::Particle => "Partykuły",
        }
    }
}

/// Which side of a card is shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
    ForeignToPolish,
    PolishToForeign,
}

impl TranslationDirection {
    pub fn front<'a>(&self, word: &'a Word) -> &'a str {
        match self {
            TranslationDirection::ForeignToPolish => &word.text,
            TranslationDirection::PolishToForeign => &word.translation,
        }
    }

    pub fn back<'a>(&self, word: &'a Word) -> &'a str {
        match self {
            TranslationDirection::ForeignToPolish => &word.translation,
            TranslationDirection::PolishToForeign => &word.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_wire_format_uses_original_field_names() {
        let word = Word::new("dog", "pies");
        let json = serde_json::to_value(&word).unwrap();
        assert_eq!(json["word"], "dog");
        assert_eq!(json["translation"], "pies");

        let parsed: Word = serde_json::from_str(r#"{"word":"cat","translation":"kot"}"#).unwrap();
        assert_eq!(parsed, Word::new("cat", "kot"));
    }

    #[test]
    fn language_ids_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_id(lang.id()), Some(lang));
        }
        assert_eq!(Language::from_id("ENGLISH"), Some(Language::English));
        assert_eq!(Language::from_id("klingon"), None);
    }

    #[test]
    fn direction_selects_card_sides() {
        let word = Word::new("perro", "pies");
        assert_eq!(TranslationDirection::ForeignToPolish.front(&word), "perro");
        assert_eq!(TranslationDirection::ForeignToPolish.back(&word), "pies");
        assert_eq!(TranslationDirection::PolishToForeign.front(&word), "pies");
        assert_eq!(TranslationDirection::PolishToForeign.back(&word), "perro");
    }
}
