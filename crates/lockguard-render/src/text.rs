use crate::{RenderableFinding, RenderableReport, RenderableSeverity, RenderableVerdictStatus};
use owo_colors::OwoColorize;

/// Human-readable terminal listing, grouped by rule in first-seen order.
///
/// With `color`, severity labels and the verdict carry ANSI styling; the text is
/// otherwise identical.
pub fn render_text(report: &RenderableReport, color: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "lockguard: {} ({}, lockfile v{}, {} packages scanned{})\n",
        verdict_label(report.verdict, color),
        report.data.lockfile,
        report.data.lockfile_version,
        report.data.packages_scanned,
        if report.data.strict { ", strict" } else { "" }
    ));

    for (check_id, findings) in group_by_rule(&report.findings) {
        out.push('\n');
        if color {
            out.push_str(&check_id.bold().to_string());
        } else {
            out.push_str(check_id);
        }
        out.push('\n');
        for f in findings {
            out.push_str(&format!(
                "  {} {}\n",
                severity_label(f.severity, color),
                f.message
            ));
            if let Some(details) = &f.details {
                out.push_str(&format!("        {details}\n"));
            }
        }
    }

    out.push_str(&format!(
        "\n{} error(s), {} warning(s), {} info: {}\n",
        report.data.errors,
        report.data.warnings,
        report.data.info,
        if report.passed { "passed" } else { "failed" }
    ));
    out
}

fn severity_label(severity: RenderableSeverity, color: bool) -> String {
    // Pad before styling so escape codes do not count toward the width.
    let label = format!("{:<5}", severity.label());
    if !color {
        return label;
    }
    match severity {
        RenderableSeverity::Error => label.red().bold().to_string(),
        RenderableSeverity::Warning => label.yellow().to_string(),
        RenderableSeverity::Info => label.cyan().to_string(),
    }
}

fn verdict_label(verdict: RenderableVerdictStatus, color: bool) -> String {
    let label = verdict.label();
    if !color {
        return label.to_string();
    }
    match verdict {
        RenderableVerdictStatus::Pass => label.green().bold().to_string(),
        RenderableVerdictStatus::Warn => label.yellow().bold().to_string(),
        RenderableVerdictStatus::Fail => label.red().bold().to_string(),
    }
}

fn group_by_rule(findings: &[RenderableFinding]) -> Vec<(&str, Vec<&RenderableFinding>)> {
    let mut groups: Vec<(&str, Vec<&RenderableFinding>)> = Vec::new();
    for f in findings {
        match groups.iter_mut().find(|(id, _)| *id == f.check_id) {
            Some((_, members)) => members.push(f),
            None => groups.push((f.check_id.as_str(), vec![f])),
        }
    }
    groups
}
