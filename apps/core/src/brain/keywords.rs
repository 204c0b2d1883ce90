//! Keyword tables and text normalization.
//!
//! Keyword matching always runs on folded text: lowercase, NFD-decomposed,
//! combining marks removed ("Cuánto" → "cuanto", "campaña" → "campana").
//! Number and contact extraction work on the raw message instead.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a message for keyword matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// True if any keyword is contained in the (already normalized) text.
pub fn contains_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| normalized.contains(k))
}

/// First keyword contained in the (already normalized) text.
pub fn first_match<'a>(normalized: &str, keywords: &[&'a str]) -> Option<&'a str> {
    keywords.iter().copied().find(|k| normalized.contains(k))
}

const LOTE_KEYWORDS: &[&str] = &["lote"];

const CAMPAIGN_KEYWORDS: &[&str] = &["campana", "temporada", "cosecha", "zafra"];

const CROP_KEYWORDS: &[&str] = &[
    "soja", "maiz", "trigo", "girasol", "algodon", "arroz", "sorgo", "cebada", "cana", "papa",
    "mani", "yerba", "citricos", "vid", "frutales",
];

const SPRAYING_KEYWORDS: &[&str] = &["pulveriz", "fumig", "aplicacion", "aplicar", "rociad"];

const PROBLEM_KEYWORDS: &[&str] = &[
    "plaga", "maleza", "yuyo", "insecto", "oruga", "chinche", "hongo", "enfermedad", "isoca",
];

// Whole-word matches: "si" must not fire on "sistema", "hola" on "holanda".
static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hola|buenas|buen dia|buenos dias|buenas tardes|buenas noches|que tal|saludos|hey)\b")
        .expect("Invalid regex: greeting keywords")
});

static YES_NO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(si|no|ok|okay|dale|claro|sip|nop|listo|bueno)\b")
        .expect("Invalid regex: yes/no keywords")
});

static DIGIT_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,}").expect("Invalid regex: digit run"));

/// Independent topic flags. Several may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicFlags {
    /// Mentions a field lot
    pub lote: bool,
    /// Mentions the season / campaign
    pub campaign: bool,
    /// Mentions a crop
    pub crop: bool,
    /// Mentions spraying or application
    pub spraying: bool,
    /// Mentions a pest, weed or disease problem
    pub problem: bool,
}

impl TopicFlags {
    pub fn detect(normalized: &str) -> Self {
        Self {
            lote: contains_any(normalized, LOTE_KEYWORDS),
            campaign: contains_any(normalized, CAMPAIGN_KEYWORDS),
            crop: contains_any(normalized, CROP_KEYWORDS),
            spraying: contains_any(normalized, SPRAYING_KEYWORDS),
            problem: contains_any(normalized, PROBLEM_KEYWORDS),
        }
    }

    pub fn any(&self) -> bool {
        self.lote || self.campaign || self.crop || self.spraying || self.problem
    }
}

pub fn is_greeting(normalized: &str) -> bool {
    GREETING_PATTERN.is_match(normalized)
}

/// Heuristic for "this message is probably just the user's name".
///
/// Short (under 30 characters once trimmed), not a yes/no answer and without
/// any run of three or more digits.
pub fn looks_like_name(raw: &str, normalized: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty()
        && trimmed.chars().count() < 30
        && !YES_NO_PATTERN.is_match(normalized)
        && !DIGIT_RUN_PATTERN.is_match(raw)
}
