//! Lockfile normalization: every supported shape becomes one flat [`PackageMap`].
//!
//! v2/v3 lockfiles already key their `packages` map by install path. v1 lockfiles
//! nest `dependencies` recursively; flattening them with the same key convention
//! is what lets the rules ignore the format version entirely.

use crate::model::{LegacyDependency, LockfileDocument, PackageEntry, PackageMap, PackageRecord};
use std::collections::BTreeMap;

pub fn normalize(doc: &LockfileDocument) -> PackageMap {
    if doc.lockfile_version() >= 2
        && let Some(packages) = &doc.packages
    {
        return from_packages(packages);
    }

    flatten_dependencies(doc.dependencies.as_ref())
}

/// Install-path key for `name` nested under `prefix` (empty prefix = top level).
pub fn child_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        format!("node_modules/{name}")
    } else {
        format!("{prefix}/node_modules/{name}")
    }
}

fn from_packages(packages: &BTreeMap<String, PackageEntry>) -> PackageMap {
    packages
        .iter()
        // The "" entry is the project itself, never a dependency.
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, entry)| {
            (
                key.clone(),
                PackageRecord {
                    key: key.clone(),
                    version: entry.version.clone(),
                    resolved: entry.resolved.clone(),
                    integrity: entry.integrity.clone(),
                    link: entry.link,
                    dev: entry.dev,
                },
            )
        })
        .collect()
}

fn flatten_dependencies(root: Option<&BTreeMap<String, LegacyDependency>>) -> PackageMap {
    let mut out = PackageMap::new();
    let Some(root) = root else {
        return out;
    };

    let mut worklist: Vec<(String, &BTreeMap<String, LegacyDependency>)> =
        vec![(String::new(), root)];

    while let Some((prefix, deps)) = worklist.pop() {
        for (name, dep) in deps {
            let key = child_key(&prefix, name);
            out.insert(
                key.clone(),
                PackageRecord {
                    key: key.clone(),
                    version: dep.version.clone(),
                    resolved: dep.resolved.clone(),
                    integrity: dep.integrity.clone(),
                    link: false,
                    dev: dep.dev,
                },
            );
            if let Some(nested) = &dep.dependencies {
                worklist.push((key, nested));
            }
        }
    }

    out
}
