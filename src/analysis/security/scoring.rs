// src/analysis/security/scoring.rs
//! Aggregate risk and the linear security score.

use crate::config::ScoringConfig;
use crate::types::{Severity, Vulnerability};

/// Highest severity found, `None` when nothing was found.
#[must_use]
pub fn aggregate_risk(vulnerabilities: &[Vulnerability]) -> Severity {
    vulnerabilities
        .iter()
        .map(|v| v.severity)
        .max()
        .unwrap_or_default()
}

#[must_use]
pub fn penalty(severity: Severity, config: &ScoringConfig) -> u32 {
    match severity {
        Severity::Critical => config.critical,
        Severity::High => config.high,
        Severity::Medium => config.medium,
        Severity::Low => config.low,
        Severity::None => 0,
    }
}

/// `base` minus one penalty per finding, floored at zero.
#[must_use]
pub fn security_score(vulnerabilities: &[Vulnerability], config: &ScoringConfig) -> u32 {
    vulnerabilities.iter().fold(config.base, |score, v| {
        score.saturating_sub(penalty(v.severity, config))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VulnerabilityCategory;

    fn vuln(severity: Severity) -> Vulnerability {
        Vulnerability {
            rule: "TEST",
            category: VulnerabilityCategory::Custom,
            element_id: "e".into(),
            element_name: "E".into(),
            severity,
            description: String::new(),
        }
    }

    #[test]
    fn empty_is_perfect() {
        let cfg = ScoringConfig::default();
        assert_eq!(security_score(&[], &cfg), 100);
        assert_eq!(aggregate_risk(&[]), Severity::None);
    }

    #[test]
    fn penalties_accumulate() {
        let cfg = ScoringConfig::default();
        let found = [vuln(Severity::Critical), vuln(Severity::High), vuln(Severity::Medium)];
        assert_eq!(security_score(&found, &cfg), 40);
        assert_eq!(aggregate_risk(&found), Severity::Critical);
    }

    #[test]
    fn floors_at_zero() {
        let cfg = ScoringConfig::default();
        let found = vec![vuln(Severity::Critical); 4];
        assert_eq!(security_score(&found, &cfg), 0);
    }

    #[test]
    fn low_costs_nothing_by_default() {
        let cfg = ScoringConfig::default();
        assert_eq!(security_score(&[vuln(Severity::Low)], &cfg), 100);
        assert_eq!(aggregate_risk(&[vuln(Severity::Low)]), Severity::Low);
    }
}
