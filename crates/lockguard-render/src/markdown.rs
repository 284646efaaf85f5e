use crate::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Lockguard report\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Lockfile: `{}` (v{}, {} packages)\n- Findings: {} error(s), {} warning(s), {} info\n",
        report.verdict.label(),
        report.data.lockfile,
        report.data.lockfile_version,
        report.data.packages_scanned,
        report.data.errors,
        report.data.warnings,
        report.data.info,
    ));
    if report.data.strict {
        out.push_str("- Strict mode: warnings escalated to errors\n");
    }
    out.push('\n');

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        match &f.package {
            Some(package) => out.push_str(&format!(
                "- [{}] `{}` / `{}`: {} (`{}`)\n",
                f.severity.label(),
                f.check_id,
                f.code,
                f.message,
                package
            )),
            None => out.push_str(&format!(
                "- [{}] `{}` / `{}`: {}\n",
                f.severity.label(),
                f.check_id,
                f.code,
                f.message
            )),
        }

        if let Some(details) = &f.details {
            out.push_str(&format!("  - details: {}\n", details));
        }
        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
