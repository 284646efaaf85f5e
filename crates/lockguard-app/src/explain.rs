//! `lockguard explain <rule-or-code>`.

use lockguard_types::explain::{self, Explanation};
use std::fmt::Write as _;

/// Whether an identifier names a rule or a finding code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    Rule,
    Code,
}

impl IdentifierKind {
    fn label(self) -> &'static str {
        match self {
            IdentifierKind::Rule => "rule",
            IdentifierKind::Code => "code",
        }
    }
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        identifier: String,
        kind: IdentifierKind,
        explanation: Explanation,
    },
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let Some(explanation) = explain::lookup_explanation(identifier) else {
        return ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        };
    };

    let kind = if explain::all_check_ids().contains(&identifier) {
        IdentifierKind::Rule
    } else {
        IdentifierKind::Code
    };

    ExplainOutput::Found {
        identifier: identifier.to_string(),
        kind,
        explanation,
    }
}

/// Terminal rendering of a found explanation. Snippets are lockfile or manifest JSON.
pub fn format_explanation(identifier: &str, kind: IdentifierKind, exp: &Explanation) -> String {
    let heading = format!("{} ({} `{}`)", exp.title, kind.label(), identifier);
    let mut out = String::new();

    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{}\n", "=".repeat(heading.len()));
    let _ = writeln!(out, "{}\n", exp.description);
    let _ = writeln!(out, "How to fix:\n  {}\n", exp.remediation);
    let _ = writeln!(out, "Flagged:\n```json\n{}\n```\n", exp.examples.before);
    let _ = writeln!(out, "Accepted:\n```json\n{}\n```", exp.examples.after);

    out
}

pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown rule or code: {identifier}\n\nAvailable rules:\n");
    for id in check_ids {
        let _ = writeln!(out, "  - {id}");
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        let _ = writeln!(out, "  - {code}");
    }
    out
}
