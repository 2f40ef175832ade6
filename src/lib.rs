//! querypipe - a demonstration SQL pipeline toolkit.
//!
//! This library exposes the core modules for use in integration tests.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod secrets;
