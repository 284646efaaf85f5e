use anyhow::Context;
use lockguard_domain::fingerprint_for;
use lockguard_render::{
    RenderableData, RenderableFinding, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use lockguard_types::{
    Finding, LockguardData, LockguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Severity, Summary,
    ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "lockguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<LockguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse lockguard v1 report")
}

pub fn serialize_report(report: &LockguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &LockguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        passed: report.summary.passed,
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            lockfile: report.data.lockfile.clone(),
            lockfile_version: report.data.lockfile_version,
            packages_scanned: report.data.packages_scanned,
            strict: report.data.strict,
            errors: report.summary.errors,
            warnings: report.summary.warnings,
            info: report.summary.info,
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        package: f.package.clone(),
        details: f.details.clone(),
        help: f.help.clone(),
    }
}

/// A failing report describing why the run could not complete.
pub fn runtime_error_report(lockfile: &str, message: &str) -> LockguardReport {
    let now = OffsetDateTime::now_utc();

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        summary: Summary {
            errors: 1,
            warnings: 0,
            info: 0,
            passed: false,
        },
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            package: None,
            details: None,
            help: Some("Fix the input or configuration and re-run lockguard.".to_string()),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_TOOL_RUNTIME,
                ids::CODE_RUNTIME_ERROR,
                None,
                None,
            )),
            data: serde_json::Value::Null,
        }],
        data: LockguardData {
            lockfile: lockfile.to_string(),
            ..LockguardData::default()
        },
    }
}
