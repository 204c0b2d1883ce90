//! Conversation sessions and their storage.

pub mod model;
pub mod store;

pub use model::{HistoryEntry, Session, SessionSnapshot, Stage};
pub use store::{BoundedSessionStore, InMemorySessionStore, SessionStore};
