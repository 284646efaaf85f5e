use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={lockfile},title={check_id}::{message}`
///
/// Every finding is attributed to the lockfile; the offending package key
/// is folded into the message.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let meta = format!(
            "file={},title={}",
            escape_property(&report.data.lockfile),
            escape_property(&format!("lockguard {}", f.check_id))
        );

        let mut message = format!("[{}:{}] {}", f.check_id, f.code, f.message);
        if let Some(details) = &f.details {
            message.push_str(&format!("\n{details}"));
        }

        out.push(format!("::{} {}::{}", level, meta, escape_data(&message)));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
