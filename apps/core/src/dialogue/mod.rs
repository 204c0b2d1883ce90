//! # Dialogue Module
//!
//! Session-state-driven response selection for the lead qualification chat.
//!
//! ## Components
//! - `responder`: ordered rule table picking one reply per turn
//! - `templates`: scripted texts
//! - `variants`: wording variant selection
//! - `reply`: reply and external lookup types

pub mod reply;
pub mod responder;
pub mod templates;
pub mod variants;

pub use reply::{LookupRequest, Reply, PRICING_SENTINEL, SPECS_SENTINEL};
pub use responder::Responder;
pub use variants::{FixedPicker, RandomPicker, VariantPicker};

use tracing::info;

use crate::brain::{Intent, MessageAnalyzer};
use crate::session::{Session, SessionSnapshot};

/// Result of processing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: Reply,
    pub intent: Intent,
    /// The lead became complete on this turn.
    pub lead_captured_now: bool,
    pub snapshot: SessionSnapshot,
}

/// Runs a full turn: count, analyze, respond, check the lead.
pub struct DialogueEngine {
    analyzer: MessageAnalyzer,
    responder: Responder,
}

impl DialogueEngine {
    pub fn new(picker: Box<dyn VariantPicker>) -> Self {
        Self {
            analyzer: MessageAnalyzer::new(),
            responder: Responder::new(picker),
        }
    }

    pub fn run_turn(&mut self, session: &mut Session, text: &str) -> TurnOutcome {
        session.record_message(text);

        let facts = self.analyzer.analyze(text);
        let reply = self.responder.respond(session, &facts, text);

        let lead_captured_now = session.mark_captured_if_complete();
        if lead_captured_now {
            info!(session_id = %session.id, "Lead captured");
        }

        TurnOutcome {
            reply,
            intent: facts.intent(),
            lead_captured_now,
            snapshot: session.snapshot(),
        }
    }
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(Box::new(RandomPicker::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Stage;

    #[test]
    fn test_run_turn_counts_and_snapshots() {
        let mut engine = DialogueEngine::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("s");

        let outcome = engine.run_turn(&mut session, "hola");
        assert_eq!(outcome.reply, Reply::Text(templates::GREETING.to_string()));
        assert_eq!(outcome.intent, Intent::General);
        assert_eq!(outcome.snapshot.messages, 1);
        assert_eq!(outcome.snapshot.stage, Stage::Greeting);
        assert!(!outcome.lead_captured_now);
    }

    #[test]
    fn test_lead_capture_fires_once() {
        let mut engine = DialogueEngine::new(Box::new(FixedPicker(0)));
        let mut session = Session::new("s");

        engine.run_turn(&mut session, "hola");
        engine.run_turn(&mut session, "Pedro");
        let outcome = engine.run_turn(&mut session, "me interesa el t50");
        assert!(!outcome.lead_captured_now);

        let outcome = engine.run_turn(&mut session, "mi cel es 11 5555 6666");
        assert!(outcome.lead_captured_now);
        assert!(outcome.snapshot.captured);

        let outcome = engine.run_turn(&mut session, "gracias");
        assert!(!outcome.lead_captured_now);
        assert!(outcome.snapshot.captured);
    }
}
