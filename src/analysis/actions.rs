//! Remediation text for each threat type.

/// Substituted when a record's confidence does not clear the active
/// threshold.
pub const MONITORING_ONLY: &str = "No action required - monitoring";

/// Fixed remediation text for a threat type.
///
/// Unknown types fall through to a templated investigation prompt so
/// the field is never empty.
pub fn recommended_action(threat_type: &str) -> String {
    let action = match threat_type {
        "System Tampering" => {
            "CRITICAL: Immediately isolate affected systems, initiate incident response \
             protocol, preserve forensic evidence, and restore from verified clean backups"
        }
        "Malware Detection" => {
            "URGENT: Quarantine infected systems immediately, run full system scan, update \
             antivirus definitions, and check network for lateral spread"
        }
        "Data Exfiltration" => {
            "EMERGENCY: Block all suspicious network connections, secure sensitive data \
             repositories, notify security team and stakeholders immediately"
        }
        "Unauthorized Access" => {
            "HIGH PRIORITY: Revoke compromised credentials immediately, review access logs, \
             strengthen authentication, and conduct security audit"
        }
        "DDoS/Network Attack" => {
            "IMMEDIATE: Activate DDoS mitigation measures, implement rate limiting, contact \
             ISP/CDN provider, monitor network traffic patterns"
        }
        "Brute Force Attack" => {
            "URGENT: Lock affected accounts, implement IP blocking, enable MFA, review and \
             strengthen password policies"
        }
        "Code Injection Attack" => {
            "CRITICAL: Take affected applications offline, patch vulnerabilities immediately, \
             implement input validation, conduct code review"
        }
        "Authentication Failure" => {
            "Monitor for patterns, review authentication logs, consider implementing account \
             lockout policies and MFA"
        }
        "Configuration/Integrity Issue" => {
            "Verify system configurations, restore from known good state, implement \
             configuration management controls"
        }
        "System Error" => {
            "Investigate root cause, check system resources, review application logs, \
             consider system maintenance"
        }
        "System Warning" => {
            "Review system performance metrics, check for resource constraints, schedule \
             maintenance if needed"
        }
        "Information" => "Continue monitoring, no immediate action required",
        "Success Event" => "No action required - normal system operation",
        "Normal Activity" => "Continue standard monitoring procedures",
        "System Event" => "Review for patterns, investigate if events become frequent or severe",
        other => {
            return format!(
                "Investigate {} and implement appropriate security measures based on risk \
                 assessment",
                other.to_lowercase()
            )
        }
    };
    action.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_fixed_actions() {
        assert!(recommended_action("Malware Detection").starts_with("URGENT"));
        assert!(recommended_action("System Tampering").starts_with("CRITICAL"));
        assert!(recommended_action("Data Exfiltration").starts_with("EMERGENCY"));
    }

    #[test]
    fn unknown_type_gets_templated_fallback() {
        let action = recommended_action("Quantum Intrusion");
        assert_eq!(
            action,
            "Investigate quantum intrusion and implement appropriate security measures \
             based on risk assessment"
        );
    }

    #[test]
    fn every_catalogue_type_is_covered() {
        for sig in crate::analysis::signature::catalogue() {
            let action = recommended_action(sig.threat_type);
            assert!(!action.is_empty());
            assert!(!action.starts_with("Investigate "));
        }
    }
}
