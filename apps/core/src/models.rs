use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::DroneModel;
use crate::dialogue::{LookupRequest, TurnOutcome};
use crate::session::SessionSnapshot;

/// Body of `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// The user's message text.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub message: String,
    /// Opaque conversation key chosen by the caller.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub session_id: String,
}

/// External work the caller has to do for this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Needs {
    /// Fetch pricing from the pricing sheet.
    pub sheets: bool,
    /// Fetch specifications from the vector knowledge base.
    pub pinecone: bool,
    /// Persist the lead; true only on the turn it became complete.
    pub save_lead: bool,
}

/// Body returned by `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// Reply text, or a lookup sentinel the caller must replace.
    pub response: String,
    pub session: SessionSnapshot,
    pub needs: Needs,
    pub intent: String,
    pub model: Option<DroneModel>,
    /// Structured form of the lookup the sentinel stands for.
    pub lookup: Option<LookupRequest>,
}

impl From<TurnOutcome> for ProcessResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            response: outcome.reply.wire_text().to_string(),
            needs: Needs {
                sheets: outcome.reply.needs_pricing(),
                pinecone: outcome.reply.needs_specs(),
                save_lead: outcome.lead_captured_now,
            },
            intent: outcome.intent.label().to_string(),
            model: outcome.snapshot.model_interest,
            lookup: outcome.reply.lookup(),
            session: outcome.snapshot,
        }
    }
}

/// Body returned by `DELETE /sessions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub sessions: usize,
    pub timestamp: DateTime<Utc>,
}
