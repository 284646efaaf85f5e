//! Render use cases: text, markdown, and GitHub annotations from in-memory reports.

use lockguard_render::RenderableReport;

pub fn render_text(report: &RenderableReport, color: bool) -> String {
    lockguard_render::render_text(report, color)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    lockguard_render::render_markdown(report)
}

/// Errors first, then warnings, then notices; capped at `max`.
pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    let mut ordered = report.clone();
    ordered
        .findings
        .sort_by_key(|f| std::cmp::Reverse(severity_rank(f.severity)));

    lockguard_render::render_github_annotations(&ordered)
        .into_iter()
        .take(max)
        .collect()
}

fn severity_rank(severity: lockguard_render::RenderableSeverity) -> u8 {
    use lockguard_render::RenderableSeverity::*;
    match severity {
        Info => 0,
        Warning => 1,
        Error => 2,
    }
}
