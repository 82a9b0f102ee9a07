//! Static threat signature catalogue.
//!
//! Signatures are plain data: detection patterns plus scoring inputs.
//! No behavior varies per signature beyond the shared scoring formula,
//! so there is no trait here, just a fixed ordered slice compiled once
//! at first use.

use crate::analysis::threat::Severity;
use once_cell::sync::Lazy;
use regex::Regex;

/// A named rule bundle used to classify a single line.
#[derive(Debug)]
pub struct Signature {
    /// Category label attached to matching records.
    pub threat_type: &'static str,
    /// Any match counts toward pattern strength.
    pub patterns: Vec<Regex>,
    pub base_severity: Severity,
    /// Window the random confidence seed is drawn from.
    pub base_confidence: (f64, f64),
    /// Substrings contributing to keyword-density scoring.
    pub keywords: &'static [&'static str],
    /// Phrases worth a large flat bonus each.
    pub critical_indicators: &'static [&'static str],
}

impl Signature {
    /// True when at least one detection pattern matches.
    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }

    /// Number of detection patterns that match the line.
    pub fn pattern_hits(&self, line: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(line)).count()
    }
}

/// The full catalogue in priority order.
///
/// Order expresses severity tiers from tampering and malware down to
/// plain informational traffic. Every signature is evaluated per line;
/// the order only breaks ties between equal confidences (first wins).
pub fn catalogue() -> &'static [Signature] {
    &CATALOGUE
}

// Patterns are fixed string literals; a compile failure here is a
// programming error, not a runtime condition.
fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("catalogue pattern must compile")
}

static CATALOGUE: Lazy<Vec<Signature>> = Lazy::new(|| {
    vec![
        Signature {
            threat_type: "System Tampering",
            patterns: vec![
                rx(r"(?i)(?:process|executable|binary|file).*(?:tampered|modified|corrupted).*(?:detected|found|identified)"),
                rx(r"(?i)suspicious.*(?:process|executable).*(?:started|launched|executed).*(?:tampered|modified)"),
                rx(r"(?i)integrity.*(?:check|verification).*failed.*(?:tampered|compromised)"),
                rx(r"(?i)(?:system|security).*(?:file|component).*tampered.*(?:alert|warning|detected)"),
            ],
            base_severity: Severity::Critical,
            base_confidence: (82.0, 96.0),
            keywords: &["tampered", "integrity", "corrupted", "modified", "suspicious"],
            critical_indicators: &["[tampered]", "[corrupted]", "[modified]", "integrity check failed"],
        },
        Signature {
            threat_type: "Malware Detection",
            patterns: vec![
                rx(r"(?i)(?:malware|virus|trojan|ransomware|backdoor|rootkit).*(?:detected|found|identified|quarantined)"),
                rx(r"(?i)(?:suspicious|malicious).*(?:file|executable|process).*(?:blocked|quarantined|removed)"),
                rx(r"(?i)(?:antivirus|security).*(?:alert|detection).*(?:malware|virus|threat)"),
                rx(r"(?i)(?:infected|compromised).*(?:file|system|process).*(?:detected|found)"),
            ],
            base_severity: Severity::Critical,
            base_confidence: (85.0, 98.0),
            keywords: &["malware", "virus", "infected", "malicious", "quarantined"],
            critical_indicators: &["[malware]", "[virus]", "[infected]", "quarantined"],
        },
        Signature {
            threat_type: "Unauthorized Access",
            patterns: vec![
                rx(r"(?i)(?:unauthorized|illegal|invalid).*(?:access|login|authentication).*(?:attempt|detected|blocked)"),
                rx(r"(?i)(?:privilege|permission).*(?:escalation|violation).*(?:detected|attempted|blocked)"),
                rx(r"(?i)(?:admin|administrator|root).*(?:access|login).*(?:unauthorized|failed|suspicious)"),
                rx(r"(?i)(?:security|access).*(?:breach|violation).*(?:detected|identified|reported)"),
            ],
            base_severity: Severity::High,
            base_confidence: (75.0, 94.0),
            keywords: &["unauthorized", "privilege", "escalation", "breach", "violation"],
            critical_indicators: &["root access", "admin breach", "privilege escalation"],
        },
        Signature {
            threat_type: "DDoS/Network Attack",
            patterns: vec![
                rx(r"(?i)(?:ddos|dos|flood).*(?:attack|detected|ongoing|mitigated)"),
                rx(r"(?i)(?:traffic|request).*(?:flood|spike|anomaly).*(?:detected|blocked|mitigated)"),
                rx(r"(?i)(?:rate|connection).*(?:limit|threshold).*(?:exceeded|violated|breached)"),
                rx(r"(?i)(?:network|bandwidth).*(?:saturation|overload).*(?:detected|reported)"),
            ],
            base_severity: Severity::High,
            base_confidence: (78.0, 92.0),
            keywords: &["ddos", "flood", "rate limit", "traffic spike", "network attack"],
            critical_indicators: &["ddos attack", "traffic flood", "network breach"],
        },
        Signature {
            threat_type: "Brute Force Attack",
            patterns: vec![
                rx(r"(?i)(?:brute.*force|dictionary|credential.*stuffing).*(?:attack|attempt|detected)"),
                rx(r"(?i)(?:multiple|repeated|consecutive).*(?:failed|unsuccessful).*(?:login|authentication).*(?:attempts|tries)"),
                rx(r"(?i)(?:password|credential).*(?:attack|cracking|guessing).*(?:detected|ongoing|blocked)"),
                rx(r"(?i)(?:login|authentication).*(?:anomaly|pattern|suspicious).*(?:detected|identified)"),
            ],
            base_severity: Severity::High,
            base_confidence: (68.0, 89.0),
            keywords: &["brute force", "failed login", "password attack", "multiple attempts"],
            critical_indicators: &["brute force attack", "credential stuffing", "password cracking"],
        },
        Signature {
            threat_type: "Code Injection Attack",
            patterns: vec![
                rx(r"(?i)(?:sql.*injection|xss|cross.*site|script.*injection|code.*injection).*(?:attempt|detected|blocked)"),
                rx(r"(?i)(?:input|parameter).*(?:validation|sanitization).*(?:failed|bypassed|violated)"),
                rx(r"(?i)(?:web|application).*(?:attack|vulnerability|exploit).*(?:detected|attempted|blocked)"),
                rx(r"(?i)(?:payload|exploit|shellcode).*(?:detected|identified|blocked|quarantined)"),
            ],
            base_severity: Severity::High,
            base_confidence: (73.0, 91.0),
            keywords: &["injection", "xss", "payload", "exploit", "shellcode"],
            critical_indicators: &["sql injection", "code injection", "exploit attempt"],
        },
        Signature {
            threat_type: "Data Exfiltration",
            patterns: vec![
                rx(r"(?i)(?:data|information).*(?:exfiltration|theft|leak|breach).*(?:detected|suspected|ongoing)"),
                rx(r"(?i)(?:unusual|suspicious|anomalous).*(?:data|file).*(?:transfer|download|upload|access)"),
                rx(r"(?i)(?:large|bulk|massive).*(?:data|file).*(?:transfer|movement|copy).*(?:detected|suspicious)"),
                rx(r"(?i)(?:sensitive|confidential|classified).*(?:data|information).*(?:accessed|transferred|leaked)"),
            ],
            base_severity: Severity::Critical,
            base_confidence: (80.0, 95.0),
            keywords: &["exfiltration", "data theft", "unusual transfer", "sensitive data"],
            critical_indicators: &["data breach", "information leak", "bulk transfer"],
        },
        Signature {
            threat_type: "Authentication Failure",
            patterns: vec![
                rx(r"(?i)(?:authentication|login).*(?:failed|unsuccessful|denied|rejected)"),
                rx(r"(?i)(?:user|account).*(?:locked|disabled|suspended).*(?:failed|multiple).*(?:attempts|tries)"),
                rx(r"(?i)(?:invalid|incorrect|wrong).*(?:credentials|password|username)"),
                rx(r"(?i)(?:session|token).*(?:expired|invalid|revoked|terminated)"),
            ],
            base_severity: Severity::Medium,
            base_confidence: (45.0, 78.0),
            keywords: &["failed login", "invalid credentials", "account locked"],
            critical_indicators: &["account lockout", "credential validation failed"],
        },
        Signature {
            threat_type: "Configuration/Integrity Issue",
            patterns: vec![
                rx(r"(?i)(?:file|data|system).*(?:integrity|checksum|hash).*(?:mismatch|failed|error|violation)"),
                rx(r"(?i)(?:configuration|config|settings).*(?:changed|modified|altered|tampered)"),
                rx(r"(?i)(?:system|application).*(?:configuration|policy).*(?:violation|breach|modified)"),
                rx(r"(?i)(?:security|access).*(?:policy|rule|setting).*(?:changed|violated|modified)"),
            ],
            base_severity: Severity::Medium,
            base_confidence: (52.0, 76.0),
            keywords: &["integrity", "checksum", "configuration", "policy violation"],
            critical_indicators: &["integrity violation", "config tampering", "policy breach"],
        },
        Signature {
            threat_type: "System Error",
            patterns: vec![
                rx(r"(?i)(?:system|application|service).*(?:error|failure|crash|exception)"),
                rx(r"(?i)(?:critical|fatal|severe).*(?:error|failure|exception|crash)"),
                rx(r"(?i)(?:service|process|application).*(?:stopped|terminated|killed|crashed)"),
                rx(r"(?i)(?:memory|disk|cpu|resource).*(?:exhausted|full|overload|critical)"),
            ],
            base_severity: Severity::Medium,
            base_confidence: (35.0, 65.0),
            keywords: &["system error", "application crash", "service failure"],
            critical_indicators: &["critical error", "system failure", "resource exhaustion"],
        },
        Signature {
            threat_type: "System Warning",
            patterns: vec![
                rx(r"(?i)(?:warning|warn|caution|notice)"),
                rx(r"(?i)(?:performance|response|latency).*(?:degradation|slow|timeout)"),
                rx(r"(?i)(?:disk|memory|storage).*(?:low|warning|threshold)"),
                rx(r"(?i)(?:connection|network).*(?:timeout|slow|degraded)"),
            ],
            base_severity: Severity::Low,
            base_confidence: (20.0, 45.0),
            keywords: &["warning", "performance", "timeout", "threshold"],
            critical_indicators: &["performance warning", "resource warning"],
        },
        Signature {
            threat_type: "Information",
            patterns: vec![
                rx(r"(?i)(?:info|information|debug|trace|verbose)"),
                rx(r"(?i)(?:started|stopped|initialized|configured|loaded)"),
                rx(r"(?i)(?:user|session).*(?:login|logout|connected|disconnected)"),
                rx(r"(?i)(?:request|operation|transaction).*(?:completed|successful|processed)"),
            ],
            base_severity: Severity::Low,
            base_confidence: (5.0, 25.0),
            keywords: &["info", "debug", "trace", "successful"],
            critical_indicators: &[],
        },
    ]
});
