use lockguard_types::{Finding, Severity, Summary, Verdict};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct AuditReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
    pub passed: bool,
}

impl AuditReport {
    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.counts.error,
            warnings: self.counts.warning,
            info: self.counts.info,
            passed: self.passed,
        }
    }
}

/// Apply strict escalation, then count and decide.
///
/// `passed` is computed after escalation, so strict mode can fail a run that
/// would otherwise pass.
pub fn aggregate(findings: Vec<Finding>, strict: bool) -> AuditReport {
    let findings = escalate(findings, strict);
    let counts = SeverityCounts::from_findings(&findings);
    let verdict = compute_verdict(&counts);

    AuditReport {
        verdict,
        passed: counts.error == 0,
        findings,
        counts,
    }
}

/// Warnings become errors under `strict`. Info is never escalated.
fn escalate(findings: Vec<Finding>, strict: bool) -> Vec<Finding> {
    if !strict {
        return findings;
    }
    findings
        .into_iter()
        .map(|f| match f.severity {
            Severity::Warning => Finding {
                severity: Severity::Error,
                ..f
            },
            _ => f,
        })
        .collect()
}

fn compute_verdict(counts: &SeverityCounts) -> Verdict {
    if counts.error > 0 {
        Verdict::Fail
    } else if counts.warning > 0 {
        Verdict::Warn
    } else {
        Verdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::finding;

    #[test]
    fn strict_escalates_warnings_but_not_info() {
        let findings = vec![
            finding(Severity::Warning, "integrity"),
            finding(Severity::Info, "lockfile-version"),
            finding(Severity::Error, "https-only"),
        ];

        let report = aggregate(findings, true);
        assert_eq!(report.counts.error, 2);
        assert_eq!(report.counts.warning, 0);
        assert_eq!(report.counts.info, 1);
        assert!(!report.passed);
        assert_eq!(report.verdict, Verdict::Fail);
    }

    #[test]
    fn strict_flips_a_warning_only_run_to_failing() {
        let findings = vec![finding(Severity::Warning, "no-file-refs")];

        let lenient = aggregate(findings.clone(), false);
        assert!(lenient.passed);
        assert_eq!(lenient.verdict, Verdict::Warn);

        let strict = aggregate(findings, true);
        assert!(!strict.passed);
        assert_eq!(strict.verdict, Verdict::Fail);
    }

    #[test]
    fn empty_run_passes() {
        let report = aggregate(Vec::new(), true);
        assert!(report.passed);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.summary(), Summary {
            errors: 0,
            warnings: 0,
            info: 0,
            passed: true,
        });
    }

    #[test]
    fn escalation_preserves_order_and_content() {
        let findings = vec![
            finding(Severity::Warning, "a"),
            finding(Severity::Error, "b"),
        ];
        let report = aggregate(findings, true);
        let ids: Vec<&str> = report.findings.iter().map(|f| f.check_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(report.findings[0].message, "a finding");
    }
}
