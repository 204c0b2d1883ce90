//! Mavilda core: lead qualification responder for agricultural drone sales.
//!
//! A message goes through the `brain` analyzer, the `dialogue` responder
//! picks one reply from the session state, and the `actors` supervisor
//! serializes turns over a `session` store. `server` exposes it over HTTP.

pub mod actors;
pub mod brain;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod models;
pub mod server;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod tests;
