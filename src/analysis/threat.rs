//! Threat record model and severity classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier assigned to a classified line.
///
/// Ordering is by risk: `Critical` is the most severe. Each tier also
/// defines the confidence band that scored values are clamped into
/// before any severity shift is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Inclusive confidence band for this tier.
    pub fn confidence_band(&self) -> (u8, u8) {
        match self {
            Severity::Critical => (75, 98),
            Severity::High => (60, 95),
            Severity::Medium => (30, 85),
            Severity::Low => (5, 70),
        }
    }

    /// Shift the tier based on the final clamped confidence.
    ///
    /// At most one rule applies; rules are checked top-down and the
    /// first hit wins, so a shifted tier is never re-shifted.
    pub fn adjusted_for(self, confidence: u8) -> Severity {
        if confidence >= 92 && self == Severity::High {
            Severity::Critical
        } else if confidence >= 85 && self == Severity::Medium {
            Severity::High
        } else if confidence >= 70 && self == Severity::Low {
            Severity::Medium
        } else if confidence < 30 && self == Severity::High {
            Severity::Medium
        } else if confidence < 15 && self == Severity::Medium {
            Severity::Low
        } else {
            self
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Whether a record warrants attention or is informational noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Active,
    Informational,
}

impl Status {
    /// Records above this confidence are considered active.
    pub const ACTIVE_THRESHOLD: u8 = 45;

    pub fn from_confidence(confidence: u8) -> Self {
        if confidence > Self::ACTIVE_THRESHOLD {
            Status::Active
        } else {
            Status::Informational
        }
    }
}

/// A single classified line from an analyzed document.
///
/// Immutable once produced. Field names serialize in camelCase so the
/// output stays wire-compatible with external analyzers that satisfy
/// the same shape contract; consumers may add fields (for example a
/// `detailedAnalysis` block) without breaking this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatRecord {
    /// Positional identifier, `THR-001`-style, 1-based over the
    /// non-blank line sequence. Not unique across documents.
    pub id: String,
    #[serde(rename = "type")]
    pub threat_type: String,
    pub severity: Severity,
    /// Extracted IP or domain, or `"Unknown"`.
    pub source: String,
    /// Coarse subsystem guess derived from line keywords.
    pub target: String,
    /// The line itself, truncated to 180 characters.
    pub description: String,
    /// Extracted timestamp, or the wall-clock time at analysis.
    pub timestamp: String,
    pub status: Status,
    /// 0-100, within the band of the pre-shift severity.
    pub confidence: u8,
    pub recommended_action: String,
}

impl ThreatRecord {
    /// Format a 1-based position in the filtered line sequence as a
    /// record identifier.
    pub fn id_for_position(position: usize) -> String {
        format!("THR-{:03}", position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_expected_ranges() {
        assert_eq!(Severity::Critical.confidence_band(), (75, 98));
        assert_eq!(Severity::High.confidence_band(), (60, 95));
        assert_eq!(Severity::Medium.confidence_band(), (30, 85));
        assert_eq!(Severity::Low.confidence_band(), (5, 70));
    }

    #[test]
    fn severity_escalates_on_high_confidence() {
        assert_eq!(Severity::High.adjusted_for(92), Severity::Critical);
        assert_eq!(Severity::Medium.adjusted_for(85), Severity::High);
        assert_eq!(Severity::Low.adjusted_for(70), Severity::Medium);
    }

    #[test]
    fn severity_de_escalates_on_low_confidence() {
        assert_eq!(Severity::High.adjusted_for(29), Severity::Medium);
        assert_eq!(Severity::Medium.adjusted_for(14), Severity::Low);
    }

    #[test]
    fn severity_shift_does_not_chain() {
        // High at 29 drops to Medium; it must not continue down to Low
        // even though 29 is above the Medium de-escalation cutoff.
        assert_eq!(Severity::High.adjusted_for(29), Severity::Medium);
        // Low at 92 rises one step to Medium only.
        assert_eq!(Severity::Low.adjusted_for(92), Severity::Medium);
    }

    #[test]
    fn severity_unchanged_in_band_middle() {
        assert_eq!(Severity::Critical.adjusted_for(80), Severity::Critical);
        assert_eq!(Severity::High.adjusted_for(75), Severity::High);
        assert_eq!(Severity::Medium.adjusted_for(50), Severity::Medium);
        assert_eq!(Severity::Low.adjusted_for(40), Severity::Low);
    }

    #[test]
    fn status_threshold_is_exclusive() {
        assert_eq!(Status::from_confidence(45), Status::Informational);
        assert_eq!(Status::from_confidence(46), Status::Active);
    }

    #[test]
    fn record_ids_are_positional() {
        assert_eq!(ThreatRecord::id_for_position(1), "THR-001");
        assert_eq!(ThreatRecord::id_for_position(42), "THR-042");
        assert_eq!(ThreatRecord::id_for_position(100), "THR-100");
    }
}
