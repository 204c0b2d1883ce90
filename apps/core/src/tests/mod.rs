//! Test Module
//!
//! Cross-module test suites for the Mavilda core.
//!
//! ## Test Categories
//! - `brain_tests`: message analysis over realistic chat lines
//! - `dialogue_tests`: full conversations through the dialogue engine
//! - `supervisor_tests`: actor turn serialization and store failures
//! - `server_tests`: HTTP contract of the axum router
