//! changelens: change classification, structured diff extraction, and
//! markdown consolidation (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod consolidate;
pub mod constants;
pub mod diff;
pub mod env;
pub mod input;
pub mod models;
pub mod output;
