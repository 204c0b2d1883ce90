//! Intent classification using ordered keyword groups.
//!
//! Groups are checked in a fixed priority order (price, demo, financing,
//! specs, compare) and the first group with a matching keyword wins. Text
//! must already be normalized (see [`super::keywords::normalize`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::first_match;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asks for a price or quote
    Price,
    /// Wants a field demonstration
    Demo,
    /// Asks about payment plans
    Financing,
    /// Asks about technical specifications or performance
    Specs,
    /// Wants models compared
    Compare,
    /// Nothing specific
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Price => "price",
            Intent::Demo => "demo",
            Intent::Financing => "financing",
            Intent::Specs => "specs",
            Intent::Compare => "compare",
            Intent::General => "general",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Keyword that decided it, if any
    pub matched_keyword: Option<String>,
}

/// Keyword group for a single intent
struct IntentPattern {
    intent: Intent,
    keywords: &'static [&'static str],
}

const PRICE_KEYWORDS: &[&str] = &[
    "precio", "costo", "cuesta", "cuanto", "valor", "cotiz", "presupuesto",
];

const DEMO_KEYWORDS: &[&str] = &["demo", "prueba", "probar", "visita", "verlo volar"];

const FINANCING_KEYWORDS: &[&str] = &["financ", "cuota", "leasing", "credito", "plan de pago"];

const SPECS_KEYWORDS: &[&str] = &[
    "rinde", "rendimiento", "especificacion", "ficha tecnica", "autonomia", "capacidad",
    "tanque", "bateria", "caracteristica",
];

const COMPARE_KEYWORDS: &[&str] = &[
    "compar", "diferencia", "versus", " vs ", "cual conviene", "mejor opcion",
];

/// Intent classifier over ordered keyword groups
pub struct IntentClassifier {
    patterns: Vec<IntentPattern>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the groups in priority order
    pub fn new() -> Self {
        let patterns = vec![
            IntentPattern {
                intent: Intent::Price,
                keywords: PRICE_KEYWORDS,
            },
            IntentPattern {
                intent: Intent::Demo,
                keywords: DEMO_KEYWORDS,
            },
            IntentPattern {
                intent: Intent::Financing,
                keywords: FINANCING_KEYWORDS,
            },
            IntentPattern {
                intent: Intent::Specs,
                keywords: SPECS_KEYWORDS,
            },
            IntentPattern {
                intent: Intent::Compare,
                keywords: COMPARE_KEYWORDS,
            },
        ];

        Self { patterns }
    }

    /// Classify normalized text
    pub fn classify(&self, normalized: &str) -> IntentResult {
        // Pad so that space-delimited keywords (" vs ") match at the edges too.
        let padded = format!(" {} ", normalized.trim());

        self.patterns
            .iter()
            .find_map(|group| {
                first_match(&padded, group.keywords).map(|keyword| IntentResult {
                    intent: group.intent,
                    matched_keyword: Some(keyword.trim().to_string()),
                })
            })
            .unwrap_or(IntentResult {
                intent: Intent::General,
                matched_keyword: None,
            })
    }
}
