use crate::fingerprint::fingerprint_for;
use crate::model::PackageMap;
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;

pub fn run(records: &PackageMap, out: &mut Vec<Finding>) {
    for record in records.values() {
        let Some(url) = record.fetched_url() else {
            continue;
        };
        if !url.starts_with("http://") {
            continue;
        }

        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_HTTPS_ONLY.to_string(),
            code: ids::CODE_INSECURE_HTTP.to_string(),
            message: format!("package '{}' is fetched over insecure http://", record.key),
            package: Some(record.key.clone()),
            details: Some(url.to_string()),
            help: Some("Regenerate the lockfile against an https:// registry.".to_string()),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_HTTPS_ONLY,
                ids::CODE_INSECURE_HTTP,
                Some(&record.key),
                Some(url),
            )),
            data: json!({
                "package": record.key,
                "resolved": url,
            }),
        });
    }
}
