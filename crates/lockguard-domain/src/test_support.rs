use crate::model::{
    LegacyDependency, LockfileDocument, ManifestDocument, PackageEntry, PackageMap, PackageRecord,
};
use lockguard_types::{Finding, Severity};
use std::collections::BTreeMap;

pub const TEST_INTEGRITY: &str = "sha512-dGVzdA==";

pub fn entry(resolved: &str) -> PackageEntry {
    PackageEntry {
        version: Some("1.0.0".to_string()),
        resolved: Some(resolved.to_string()),
        integrity: Some(TEST_INTEGRITY.to_string()),
        link: false,
        dev: false,
    }
}

pub fn link_entry(target: &str) -> PackageEntry {
    PackageEntry {
        resolved: Some(target.to_string()),
        link: true,
        ..PackageEntry::default()
    }
}

pub fn legacy(resolved: &str) -> LegacyDependency {
    LegacyDependency {
        version: Some("1.0.0".to_string()),
        resolved: Some(resolved.to_string()),
        integrity: Some(TEST_INTEGRITY.to_string()),
        dev: false,
        dependencies: None,
    }
}

pub fn lockfile_v2(entries: Vec<(&str, PackageEntry)>) -> LockfileDocument {
    LockfileDocument {
        name: Some("app".to_string()),
        version: Some("1.0.0".to_string()),
        lockfile_version: Some(3),
        packages: Some(
            entries
                .into_iter()
                .map(|(k, e)| (k.to_string(), e))
                .collect(),
        ),
        dependencies: None,
    }
}

pub fn lockfile_v1(entries: Vec<(&str, LegacyDependency)>) -> LockfileDocument {
    LockfileDocument {
        name: Some("app".to_string()),
        version: Some("1.0.0".to_string()),
        lockfile_version: Some(1),
        packages: None,
        dependencies: Some(
            entries
                .into_iter()
                .map(|(k, d)| (k.to_string(), d))
                .collect(),
        ),
    }
}

pub fn manifest(
    name: Option<&str>,
    version: Option<&str>,
    deps: &[&str],
    dev_deps: &[&str],
) -> ManifestDocument {
    let ranges = |names: &[&str]| -> BTreeMap<String, String> {
        names
            .iter()
            .map(|n| (n.to_string(), "^1.0.0".to_string()))
            .collect()
    };
    ManifestDocument {
        name: name.map(str::to_string),
        version: version.map(str::to_string),
        dependencies: ranges(deps),
        dev_dependencies: ranges(dev_deps),
    }
}

pub fn record(key: &str, resolved: Option<&str>) -> PackageRecord {
    PackageRecord {
        key: key.to_string(),
        version: Some("1.0.0".to_string()),
        resolved: resolved.map(str::to_string),
        integrity: Some(TEST_INTEGRITY.to_string()),
        link: false,
        dev: false,
    }
}

pub fn records(list: Vec<PackageRecord>) -> PackageMap {
    list.into_iter().map(|r| (r.key.clone(), r)).collect()
}

pub fn finding(severity: Severity, check_id: &str) -> Finding {
    Finding {
        severity,
        check_id: check_id.to_string(),
        code: "test".to_string(),
        message: format!("{check_id} finding"),
        package: None,
        details: None,
        help: None,
        fingerprint: None,
        data: serde_json::Value::Null,
    }
}
