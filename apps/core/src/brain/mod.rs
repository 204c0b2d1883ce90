//! # Brain Module
//!
//! Fast, rule-based analysis of incoming chat messages.
//! Turns raw user text into [`MessageFacts`] before the dialogue layer
//! decides what to answer.
//!
//! ## Components
//! - `keywords`: normalization, topic/greeting/name heuristics
//! - `entities`: model, surface, phone and email extraction
//! - `intent`: ordered keyword-group intent classification
//! - `facts`: output data structure
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod entities;
pub mod facts;
pub mod intent;
pub mod keywords;

pub use analyzer::MessageAnalyzer;
pub use facts::MessageFacts;
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use keywords::TopicFlags;
