use crate::fingerprint::fingerprint_for;
use crate::model::PackageMap;
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;

/// Links are deliberately not exempt here: a `file:` origin is an unlinked local path.
pub fn run(records: &PackageMap, out: &mut Vec<Finding>) {
    for record in records.values() {
        let Some(url) = record.resolved.as_deref() else {
            continue;
        };
        if !url.starts_with("file:") {
            continue;
        }

        out.push(Finding {
            severity: Severity::Warning,
            check_id: ids::CHECK_NO_FILE_REFS.to_string(),
            code: ids::CODE_FILE_REFERENCE.to_string(),
            message: format!("package '{}' references a local file path", record.key),
            package: Some(record.key.clone()),
            details: Some(url.to_string()),
            help: Some(
                "Publish the package or turn it into a workspace member instead of a file: reference."
                    .to_string(),
            ),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_NO_FILE_REFS,
                ids::CODE_FILE_REFERENCE,
                Some(&record.key),
                Some(url),
            )),
            data: json!({
                "package": record.key,
                "resolved": url,
                "link": record.link,
            }),
        });
    }
}
