//! Heuristic threat-scoring engine.
//!
//! Pure, synchronous computation over one in-memory document: no I/O,
//! no shared mutable state. The only nondeterminism is the random
//! confidence seed, injectable through [`classifier::ThreatAnalyzer::analyze_with_rng`].

pub mod actions;
pub mod classifier;
pub mod entropy;
pub mod extract;
pub mod scorer;
pub mod signature;
pub mod threat;

pub use classifier::{AnalysisReport, ThreatAnalyzer};
pub use threat::{Severity, Status, ThreatRecord};
