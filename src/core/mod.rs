//! Shared primitives: documents, the requirement model, reports, and the
//! configuration, output and logging plumbing every gate uses.

pub mod assets;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod requirement;
