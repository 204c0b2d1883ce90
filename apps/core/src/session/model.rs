use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::DroneModel;

/// Coarse phase of the scripted conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Greeting,
    Diagnosis,
    Proposal,
    Capture,
}

/// One user message in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-conversation state.
///
/// The contact and interest fields are first-write-wins: once set they are
/// never overwritten. `captured` only ever goes from `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub stage: Stage,
    pub message_count: u32,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    pub model_interest: Option<DroneModel>,
    pub surface_ha: Option<u32>,
    pub waiting_for_name: bool,
    /// A surface-based model recommendation was already sent.
    #[serde(default)]
    recommended: bool,
    captured: bool,
    history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
}

/// Read-only view of a session returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: String,
    pub user_name: Option<String>,
    pub user_phone: Option<String>,
    pub user_email: Option<String>,
    pub model_interest: Option<DroneModel>,
    #[serde(rename = "surfaceHA")]
    pub surface_ha: Option<u32>,
    pub messages: u32,
    pub stage: Stage,
    pub captured: bool,
}

/// Store `value` into `slot` unless it is already set. Returns whether it wrote.
fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (slot.is_none(), value) {
        (true, Some(v)) => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stage: Stage::default(),
            message_count: 0,
            user_name: None,
            user_phone: None,
            user_email: None,
            model_interest: None,
            surface_ha: None,
            waiting_for_name: false,
            recommended: false,
            captured: false,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Count an incoming message and append it to the history.
    pub fn record_message(&mut self, text: &str) {
        self.message_count += 1;
        self.history.push(HistoryEntry {
            user: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        set_once(&mut self.user_name, Some(name.into()))
    }

    pub fn set_phone(&mut self, phone: Option<String>) -> bool {
        set_once(&mut self.user_phone, phone)
    }

    pub fn set_email(&mut self, email: Option<String>) -> bool {
        set_once(&mut self.user_email, email)
    }

    pub fn set_model(&mut self, model: Option<DroneModel>) -> bool {
        set_once(&mut self.model_interest, model)
    }

    pub fn set_surface(&mut self, surface_ha: Option<u32>) -> bool {
        set_once(&mut self.surface_ha, surface_ha)
    }

    pub fn recommendation_given(&self) -> bool {
        self.recommended
    }

    pub fn mark_recommendation_given(&mut self) {
        self.recommended = true;
    }

    /// Name, model and at least one contact method are known.
    pub fn has_complete_lead(&self) -> bool {
        self.user_name.is_some()
            && self.model_interest.is_some()
            && (self.user_phone.is_some() || self.user_email.is_some())
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Mark the lead as captured if it is complete.
    ///
    /// Returns `true` only on the call where `captured` flips to `true`.
    pub fn mark_captured_if_complete(&mut self) -> bool {
        if self.captured || !self.has_complete_lead() {
            return false;
        }
        self.captured = true;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            user_name: self.user_name.clone(),
            user_phone: self.user_phone.clone(),
            user_email: self.user_email.clone(),
            model_interest: self.model_interest,
            surface_ha: self.surface_ha,
            messages: self.message_count,
            stage: self.stage,
            captured: self.captured,
        }
    }
}
