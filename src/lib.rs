//! ThreatLens — heuristic threat analysis for logs and documents.
//!
//! Scores each line of an operational text document against a static
//! signature catalogue and produces ranked threat records with
//! severity, confidence, extracted metadata, and remediation advice.
//! Serves as the local fallback when no external analyzer is
//! configured, and defines the record shape such analyzers must match.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod logging;
