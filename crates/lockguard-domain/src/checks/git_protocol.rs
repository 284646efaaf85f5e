use crate::fingerprint::fingerprint_for;
use crate::model::{PackageMap, PackageRecord};
use crate::policy::RunConfiguration;
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;

/// Three independent sub-checks; one record may trip several of them.
pub fn run(records: &PackageMap, cfg: &RunConfiguration, out: &mut Vec<Finding>) {
    for record in records.values() {
        let Some(url) = record.resolved.as_deref() else {
            continue;
        };

        if !cfg.allow_git && url.starts_with("git://") {
            out.push(git_finding(
                record,
                url,
                Severity::Error,
                ids::CODE_GIT_PROTOCOL,
                format!("package '{}' is fetched over unencrypted git://", record.key),
                "Depend on a registry release, or set `allow_git = true` if git sources are intended.",
            ));
        }

        if !cfg.allow_git && url.starts_with("git+ssh://") {
            out.push(git_finding(
                record,
                url,
                Severity::Warning,
                ids::CODE_GIT_SSH_PROTOCOL,
                format!("package '{}' is fetched over git+ssh://", record.key),
                "Depend on a registry release, or set `allow_git = true` if git sources are intended.",
            ));
        }

        if !cfg.allow_github && url.contains("github.com") && !url.starts_with("https://registry.")
        {
            out.push(git_finding(
                record,
                url,
                Severity::Warning,
                ids::CODE_GITHUB_REFERENCE,
                format!("package '{}' is fetched directly from GitHub", record.key),
                "Depend on a registry release, or set `allow_github = true` if GitHub sources are intended.",
            ));
        }
    }
}

fn git_finding(
    record: &PackageRecord,
    url: &str,
    severity: Severity,
    code: &str,
    message: String,
    help: &str,
) -> Finding {
    Finding {
        severity,
        check_id: ids::CHECK_GIT_PROTOCOL.to_string(),
        code: code.to_string(),
        message,
        package: Some(record.key.clone()),
        details: Some(url.to_string()),
        help: Some(help.to_string()),
        fingerprint: Some(fingerprint_for(
            ids::CHECK_GIT_PROTOCOL,
            code,
            Some(&record.key),
            Some(url),
        )),
        data: json!({
            "package": record.key,
            "resolved": url,
        }),
    }
}
