use crate::fingerprint::fingerprint_for;
use crate::model::{LockfileDocument, ManifestDocument, PackageMap};
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;
use std::collections::BTreeMap;

/// Manifest-to-lockfile drift. One-directional: lockfile entries absent from the
/// manifest are transitive dependencies and are never reported.
pub fn run(
    records: &PackageMap,
    lockfile: &LockfileDocument,
    manifest: Option<&ManifestDocument>,
    out: &mut Vec<Finding>,
) {
    let Some(manifest) = manifest else {
        return;
    };

    if let (Some(lock_name), Some(manifest_name)) = (&lockfile.name, &manifest.name)
        && lock_name != manifest_name
    {
        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SYNC.to_string(),
            code: ids::CODE_NAME_MISMATCH.to_string(),
            message: format!(
                "lockfile name \"{lock_name}\" does not match manifest name \"{manifest_name}\""
            ),
            package: None,
            details: None,
            help: Some("Regenerate the lockfile from this project's package.json.".to_string()),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_SYNC,
                ids::CODE_NAME_MISMATCH,
                None,
                None,
            )),
            data: json!({
                "lockfile": lock_name,
                "manifest": manifest_name,
            }),
        });
    }

    if let (Some(lock_version), Some(manifest_version)) = (&lockfile.version, &manifest.version)
        && lock_version != manifest_version
    {
        out.push(Finding {
            severity: Severity::Warning,
            check_id: ids::CHECK_SYNC.to_string(),
            code: ids::CODE_VERSION_MISMATCH.to_string(),
            message: format!(
                "lockfile version \"{lock_version}\" does not match manifest version \"{manifest_version}\""
            ),
            package: None,
            details: None,
            help: Some("Run `npm install` after changing the version in package.json.".to_string()),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_SYNC,
                ids::CODE_VERSION_MISMATCH,
                None,
                None,
            )),
            data: json!({
                "lockfile": lock_version,
                "manifest": manifest_version,
            }),
        });
    }

    // A single-entry (or empty) lockfile is too degenerate to compare against.
    if records.len() <= 1 {
        return;
    }

    for (name, section) in declared_dependencies(manifest) {
        if is_locked(records, lockfile, name) {
            continue;
        }

        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_SYNC.to_string(),
            code: ids::CODE_MISSING_FROM_LOCKFILE.to_string(),
            message: format!("'{name}' is in the manifest but not in the lockfile"),
            package: None,
            details: Some(format!("declared in {section}")),
            help: Some("Run `npm install` and commit the updated lockfile.".to_string()),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_SYNC,
                ids::CODE_MISSING_FROM_LOCKFILE,
                Some(name),
                None,
            )),
            data: json!({
                "dependency": name,
                "section": section,
            }),
        });
    }
}

/// Union of `dependencies` and `devDependencies`, remembering the first section seen.
fn declared_dependencies(manifest: &ManifestDocument) -> BTreeMap<&str, &'static str> {
    let mut names = BTreeMap::new();
    for name in manifest.dependencies.keys() {
        names.insert(name.as_str(), "dependencies");
    }
    for name in manifest.dev_dependencies.keys() {
        names.entry(name.as_str()).or_insert("devDependencies");
    }
    names
}

/// Present at any nesting depth, or in the legacy top-level `dependencies` map.
fn is_locked(records: &PackageMap, lockfile: &LockfileDocument, name: &str) -> bool {
    let top_level = format!("node_modules/{name}");
    let nested = format!("/node_modules/{name}");

    records
        .keys()
        .any(|key| *key == top_level || key.ends_with(&nested))
        || lockfile
            .dependencies
            .as_ref()
            .is_some_and(|deps| deps.contains_key(name))
}
