//! Generated word lists.
//!
//! A thin client over the Gemini `generateContent` API with a structured
//! output schema pinning the response to an array of word/translation
//! objects. Any failure — transport, HTTP status, parse, empty result —
//! substitutes a fixed per-language fallback list, so generation never
//! fails from the caller's point of view.

use std::time::Duration;

use fiszki_core::{Language, Level, Word, WordCategory};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct WordSourceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_endpoint: String,
    pub timeout: Duration,
    pub mock: bool,
}

impl Default for WordSourceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            mock: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("word source not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response carried no generated text")]
    EmptyCandidates,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Clone)]
pub struct WordSource {
    config: WordSourceConfig,
    client: reqwest::Client,
}

impl WordSource {
    pub fn new(config: WordSourceConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn from_env() -> Self {
        let api_key = env_string("GEMINI_API_KEY");
        let model = env_string("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_endpoint = env_string("GEMINI_API_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout = Duration::from_millis(env_u64("GEMINI_TIMEOUT").unwrap_or(DEFAULT_TIMEOUT_MS));
        let mock = env_bool("GEMINI_MOCK").unwrap_or(false);

        Self::new(WordSourceConfig {
            api_key,
            model,
            api_endpoint,
            timeout,
            mock,
        })
    }

    pub fn is_available(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
    }

    /// A word list for the selection, falling back to the static list on
    /// any failure. Never errors.
    pub async fn generate(
        &self,
        language: Language,
        level: Level,
        category: Option<WordCategory>,
    ) -> Vec<Word> {
        if self.config.mock {
            debug!(%language, %level, "word source mock enabled, serving fallback list");
            return fallback_words(language);
        }

        match self.request_words(language, level, category).await {
            Ok(words) if !words.is_empty() => words,
            Ok(_) => {
                warn!(%language, %level, "word source returned an empty list, falling back");
                fallback_words(language)
            }
            Err(err) => {
                warn!(error = %err, %language, %level, "word generation failed, falling back");
                fallback_words(language)
            }
        }
    }

    async fn request_words(
        &self,
        language: Language,
        level: Level,
        category: Option<WordCategory>,
    ) -> Result<Vec<Word>, WordSourceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(WordSourceError::NotConfigured("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_endpoint, self.config.model
        );
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(language, level, category) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WordSourceError::HttpStatus { status, body });
        }

        let response: GenerateContentResponse = resp.json().await?;
        let text = response
            .first_text()
            .ok_or(WordSourceError::EmptyCandidates)?;
        let words: Vec<Word> = serde_json::from_str(text.trim())?;
        Ok(words)
    }
}

fn build_prompt(language: Language, level: Level, category: Option<WordCategory>) -> String {
    match category {
        Some(category) => format!(
            "Wygeneruj listę 100 popularnych słów z kategorii \"{}\" w języku {} na poziomie {} (CEFR). \
             Zwróć wynik jako tablicę obiektów JSON, gdzie każdy obiekt zawiera klucz \"word\" ze słowem \
             w języku obcym i klucz \"translation\" z jego polskim tłumaczeniem. Słowa powinny być \
             w podstawowej formie (np. bezokolicznik dla czasowników, mianownik dla rzeczowników).",
            category.display_name(),
            language.display_name(),
            level
        ),
        None => format!(
            "Wygeneruj listę 50 popularnych czasowników w języku {} na poziomie {} (CEFR). \
             Zwróć wynik jako tablicę obiektów JSON, gdzie każdy obiekt zawiera klucz \"word\" \
             z czasownikiem w języku obcym i klucz \"translation\" z jego polskim tłumaczeniem. \
             Czasowniki powinny być w formie bezokolicznika.",
            language.display_name(),
            level
        ),
    }
}

fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "word": {
                    "type": "STRING",
                    "description": "Słowo w języku obcym w formie podstawowej."
                },
                "translation": {
                    "type": "STRING",
                    "description": "Polskie tłumaczenie słowa."
                }
            },
            "required": ["word", "translation"]
        }
    })
}

/// Fixed per-language list served whenever generation is unavailable.
pub fn fallback_words(language: Language) -> Vec<Word> {
    match language {
        Language::English => vec![
            Word::new("be", "być"),
            Word::new("have", "mieć"),
            Word::new("do", "robić"),
            Word::new("say", "powiedzieć"),
            Word::new("go", "iść"),
        ],
        Language::Spanish => vec![
            Word::new("ser", "być"),
            Word::new("tener", "mieć"),
            Word::new("hacer", "robić"),
            Word::new("decir", "powiedzieć"),
            Word::new("ir", "iść"),
        ],
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_string(key).map(|v| v == "true" || v == "1")
}
