//! Metadata extraction from individual log lines.
//!
//! These are deterministic, idempotent helpers: the same line always
//! yields the same substring. Each returns the first match only.

use once_cell::sync::Lazy;
use regex::Regex;

static IP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("ip pattern must compile")
});

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://)?(?:www\.)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}")
        .expect("domain pattern must compile")
});

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}[T\s]\d{2}:\d{2}:\d{2}").expect("timestamp pattern must compile")
});

static CUSTOM_TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}")
        .expect("custom timestamp pattern must compile")
});

/// First dotted-quad in the line.
///
/// Octets are not range-checked, so `999.1.1.1` matches. Accepting
/// syntactically invalid addresses is a documented false-positive
/// trade-off inherited from the upstream contract.
pub fn extract_ip(line: &str) -> Option<&str> {
    IP_RE.find(line).map(|m| m.as_str())
}

/// First hostname-shaped token, with optional scheme and `www.`
/// prefix. Only consulted when no IP was found in the line.
pub fn extract_domain(line: &str) -> Option<&str> {
    DOMAIN_RE.find(line).map(|m| m.as_str())
}

/// First ISO-like timestamp (`YYYY-MM-DDTHH:MM:SS` or with a single
/// space separator).
pub fn extract_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP_RE.find(line).map(|m| m.as_str())
}

/// Looser timestamp variant for log dialects that pad the separator
/// with extra whitespace instead of `T`.
pub fn extract_custom_timestamp(line: &str) -> Option<&str> {
    CUSTOM_TIMESTAMP_RE.find(line).map(|m| m.as_str())
}

/// True when the line carries a dotted-quad pattern. Used by the
/// scorer's context bonus without allocating.
pub fn has_ip(line: &str) -> bool {
    IP_RE.is_match(line)
}

/// True when the line carries an ISO-style timestamp.
pub fn has_timestamp(line: &str) -> bool {
    TIMESTAMP_RE.is_match(line)
}
