use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords;

/// Language whose stopword list and stemmer are applied to questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt", alias = "portuguese")]
    Portuguese,
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    fn algorithm(self) -> Algorithm {
        match self {
            Language::Portuguese => Algorithm::Portuguese,
            Language::English => Algorithm::English,
        }
    }

    fn stopwords(self) -> &'static HashSet<&'static str> {
        match self {
            Language::Portuguese => &stopwords::PORTUGUESE,
            Language::English => &stopwords::ENGLISH,
        }
    }
}

/// Turns a raw question into the canonical key used by the knowledge base:
/// lowercase, alphanumeric word tokens only, stopwords removed, each token
/// reduced to its stem, joined by single spaces.
pub struct Normalizer {
    language: Language,
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            stemmer: Stemmer::create(language.algorithm()),
        }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let stopwords = self.language.stopwords();

        lowered
            .unicode_words()
            .filter(|token| token.chars().all(char::is_alphanumeric))
            .filter(|token| !stopwords.contains(*token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("language", &self.language)
            .finish()
    }
}

/// Normalize with the default (Portuguese) rules
pub fn normalize(raw: &str) -> String {
    Normalizer::default().normalize(raw)
}
