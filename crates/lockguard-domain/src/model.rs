use serde::Deserialize;
use std::collections::BTreeMap;

/// Normalized records keyed by their `node_modules/...` path.
pub type PackageMap = BTreeMap<String, PackageRecord>;

/// One resolved dependency occurrence.
///
/// The same package may appear several times at different tree depths; each
/// occurrence gets its own key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub key: String,
    pub version: Option<String>,
    /// Fetch origin. Absent for root and workspace entries.
    pub resolved: Option<String>,
    /// Only presence is checked, never the digest itself.
    pub integrity: Option<String>,
    /// Workspace or symlinked entry.
    pub link: bool,
    pub dev: bool,
}

impl PackageRecord {
    /// `resolved` for records that are actually fetched (not workspace links).
    pub fn fetched_url(&self) -> Option<&str> {
        if self.link {
            return None;
        }
        self.resolved.as_deref()
    }
}

/// Decoded `package-lock.json` / `npm-shrinkwrap.json`.
///
/// Only the fields lockguard reads are modelled; everything else is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockfileDocument {
    pub name: Option<String>,
    pub version: Option<String>,
    pub lockfile_version: Option<u32>,

    /// v2/v3 flat map keyed by install path. The project root lives under `""`.
    pub packages: Option<BTreeMap<String, PackageEntry>>,

    /// v1 recursive tree (also present, as a legacy mirror, in v2 lockfiles).
    pub dependencies: Option<BTreeMap<String, LegacyDependency>>,
}

impl LockfileDocument {
    /// Effective format version; a missing or zero `lockfileVersion` means 1.
    pub fn lockfile_version(&self) -> u32 {
        match self.lockfile_version {
            None | Some(0) => 1,
            Some(v) => v,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.lockfile_version() < 2
    }
}

/// One entry of the v2/v3 `packages` map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PackageEntry {
    pub version: Option<String>,
    pub resolved: Option<String>,
    pub integrity: Option<String>,
    #[serde(default)]
    pub link: bool,
    #[serde(default)]
    pub dev: bool,
}

/// One node of the v1 `dependencies` tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyDependency {
    pub version: Option<String>,
    pub resolved: Option<String>,
    pub integrity: Option<String>,
    #[serde(default)]
    pub dev: bool,
    pub dependencies: Option<BTreeMap<String, LegacyDependency>>,
}

/// Decoded `package.json`. Range values are kept but never interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}
