//! Message Analyzer - Main orchestrator for the brain module.
//!
//! Runs normalization, entity extraction, intent classification and the
//! topic/heuristic flags over one message. Pure and deterministic.

use tracing::debug;

use super::entities::{detect_email, detect_model, detect_phone, detect_surface};
use super::facts::MessageFacts;
use super::intent::IntentClassifier;
use super::keywords::{is_greeting, looks_like_name, normalize, TopicFlags};

/// Main analyzer that orchestrates all detection components
pub struct MessageAnalyzer {
    intent_classifier: IntentClassifier,
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
        }
    }

    /// Analyze a raw message and produce its facts
    pub fn analyze(&self, text: &str) -> MessageFacts {
        let normalized = normalize(text);
        let mut facts = MessageFacts::empty(normalized);

        // 1. Entities. Keywords and surface use folded text, contacts use raw text.
        facts.model = detect_model(&facts.normalized);
        if let Some((hectares, pattern)) = detect_surface(&facts.normalized) {
            facts.surface_ha = Some(hectares);
            facts.surface_pattern = Some(pattern.to_string());
        }
        facts.phone = detect_phone(text);
        facts.email = detect_email(text);

        // 2. Intent
        facts.intent = self.intent_classifier.classify(&facts.normalized);

        // 3. Flags
        facts.topics = TopicFlags::detect(&facts.normalized);
        facts.is_greeting = is_greeting(&facts.normalized);
        facts.looks_like_name = looks_like_name(text, &facts.normalized);

        debug!("{}", facts.summary());
        facts
    }
}
