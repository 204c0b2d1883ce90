use serde::{Deserialize, Serialize};

use crate::catalog::DroneModel;

/// Wire marker telling callers to fetch pricing from the pricing sheet.
pub const PRICING_SENTINEL: &str = "__NEEDS_SHEETS__";

/// Wire marker telling callers to fetch specifications from the knowledge base.
pub const SPECS_SENTINEL: &str = "__NEEDS_PINECONE__";

/// External capability the caller must consult before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LookupRequest {
    /// Price quote from the pricing sheet
    Pricing { model: DroneModel },
    /// Technical specifications from the vector knowledge base
    Specs { model: DroneModel },
}

impl LookupRequest {
    pub fn model(&self) -> DroneModel {
        match self {
            LookupRequest::Pricing { model } | LookupRequest::Specs { model } => *model,
        }
    }

    pub fn sentinel(&self) -> &'static str {
        match self {
            LookupRequest::Pricing { .. } => PRICING_SENTINEL,
            LookupRequest::Specs { .. } => SPECS_SENTINEL,
        }
    }
}

/// What the responder decided to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Final text for the user
    Text(String),
    /// The caller must fulfil a lookup and substitute the real content
    Lookup(LookupRequest),
}

impl Reply {
    /// Text placed in the `response` field: the message or the lookup sentinel.
    pub fn wire_text(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Lookup(request) => request.sentinel(),
        }
    }

    pub fn lookup(&self) -> Option<LookupRequest> {
        match self {
            Reply::Lookup(request) => Some(*request),
            Reply::Text(_) => None,
        }
    }

    pub fn needs_pricing(&self) -> bool {
        matches!(self, Reply::Lookup(LookupRequest::Pricing { .. }))
    }

    pub fn needs_specs(&self) -> bool {
        matches!(self, Reply::Lookup(LookupRequest::Specs { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_wire_text() {
        let pricing = Reply::Lookup(LookupRequest::Pricing {
            model: DroneModel::T50,
        });
        assert_eq!(pricing.wire_text(), PRICING_SENTINEL);
        assert!(pricing.needs_pricing());
        assert!(!pricing.needs_specs());

        let specs = Reply::Lookup(LookupRequest::Specs {
            model: DroneModel::T100,
        });
        assert_eq!(specs.wire_text(), SPECS_SENTINEL);
        assert_eq!(specs.lookup().map(|l| l.model()), Some(DroneModel::T100));
    }

    #[test]
    fn test_sentinels_match_existing_callers() {
        assert_eq!(PRICING_SENTINEL, "__NEEDS_SHEETS__");
        assert_eq!(SPECS_SENTINEL, "__NEEDS_PINECONE__");
    }

    #[test]
    fn test_text_reply() {
        let reply = Reply::Text("hola".into());
        assert_eq!(reply.wire_text(), "hola");
        assert!(reply.lookup().is_none());
        assert!(!reply.needs_pricing());
    }

    #[test]
    fn test_lookup_serializes_tagged() {
        let json = serde_json::to_value(LookupRequest::Pricing {
            model: DroneModel::T25P,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "pricing", "model": "T25P" }));
    }
}
