//! Message Facts - Output structure for message analysis.
//!
//! Everything the analyzer could extract from one user message. Absent
//! detections are `None` / `false`, never errors.

use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentResult};
use super::keywords::TopicFlags;
use crate::catalog::DroneModel;

/// Structured facts extracted from a single message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFacts {
    /// Folded text used for keyword matching
    pub normalized: String,

    /// Detected product model
    pub model: Option<DroneModel>,

    /// Detected surface in hectares
    pub surface_ha: Option<u32>,

    /// Name of the surface pattern that matched
    pub surface_pattern: Option<String>,

    /// Phone digits
    pub phone: Option<String>,

    /// Email address, lowercased
    pub email: Option<String>,

    /// Classified intent
    pub intent: IntentResult,

    /// Topic flags
    pub topics: TopicFlags,

    /// Contains a salutation
    pub is_greeting: bool,

    /// Short, digit-free, not a yes/no answer
    pub looks_like_name: bool,
}

impl MessageFacts {
    /// Facts for a message where nothing was detected
    pub fn empty(normalized: String) -> Self {
        Self {
            normalized,
            model: None,
            surface_ha: None,
            surface_pattern: None,
            phone: None,
            email: None,
            intent: IntentResult {
                intent: Intent::General,
                matched_keyword: None,
            },
            topics: TopicFlags::default(),
            is_greeting: false,
            looks_like_name: false,
        }
    }

    pub fn intent(&self) -> Intent {
        self.intent.intent
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {} ({}), Model: {}, Surface: {}, Phone: {}, Email: {}, Name-like: {}",
            self.intent.intent,
            self.intent.matched_keyword.as_deref().unwrap_or("-"),
            self.model.map(|m| m.code()).unwrap_or("-"),
            self.surface_ha
                .map(|ha| format!("{} ha", ha))
                .unwrap_or_else(|| "-".to_string()),
            if self.phone.is_some() { "yes" } else { "no" },
            if self.email.is_some() { "yes" } else { "no" },
            self.looks_like_name
        )
    }
}
