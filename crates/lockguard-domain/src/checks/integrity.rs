use crate::fingerprint::fingerprint_for;
use crate::model::PackageMap;
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;

/// Upper bound on package keys spelled out in `details`.
pub const MAX_LISTED: usize = 10;

/// Emits at most one aggregate finding for the whole lockfile.
pub fn run(records: &PackageMap, out: &mut Vec<Finding>) {
    let missing: Vec<&str> = records
        .values()
        .filter(|r| r.fetched_url().is_some() && r.integrity.is_none())
        .map(|r| r.key.as_str())
        .collect();

    if missing.is_empty() {
        return;
    }

    let count = missing.len();
    let noun = if count == 1 { "package is" } else { "packages are" };

    out.push(Finding {
        severity: Severity::Warning,
        check_id: ids::CHECK_INTEGRITY.to_string(),
        code: ids::CODE_MISSING_INTEGRITY.to_string(),
        message: format!("{count} {noun} missing an integrity hash"),
        package: None,
        details: Some(listing(&missing)),
        help: Some(
            "Regenerate the lockfile with a current npm so every fetched package records `integrity`."
                .to_string(),
        ),
        fingerprint: Some(fingerprint_for(
            ids::CHECK_INTEGRITY,
            ids::CODE_MISSING_INTEGRITY,
            None,
            None,
        )),
        data: json!({
            "count": count,
            "packages": missing,
        }),
    });
}

fn listing(keys: &[&str]) -> String {
    let shown = keys[..keys.len().min(MAX_LISTED)].join(", ");
    if keys.len() > MAX_LISTED {
        format!("{shown}, and {} more", keys.len() - MAX_LISTED)
    } else {
        shown
    }
}
