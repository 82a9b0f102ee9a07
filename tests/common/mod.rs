//! Shared test utilities for ThreatLens integration tests.

use assert_cmd::Command;

/// Returns a `Command` configured to run the `threatlens` binary.
#[allow(dead_code)]
pub fn threatlens_cmd() -> Command {
    Command::cargo_bin("threatlens").unwrap()
}

/// A document whose lines are known to trigger high-confidence
/// signature matches.
#[allow(dead_code)]
pub const MALICIOUS_LOG: &str = "\
2025-08-18 12:31:16 [CRITICAL] malware detected on host, quarantined
2025-08-18 12:31:17 unauthorized access attempt blocked for root from 203.0.113.7
2025-08-18 12:31:18 data exfiltration suspected, bulk transfer to 198.51.100.2
";

/// A document of routine operational noise.
#[allow(dead_code)]
pub const BENIGN_LOG: &str = "\
service heartbeat at interval
backup job ran to completion
User login successful for admin
";
