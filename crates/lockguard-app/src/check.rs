//! The `check` use case: load documents, evaluate rules, and produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use lockguard_domain::fingerprint_for;
use lockguard_domain::model::{LockfileDocument, ManifestDocument};
use lockguard_repo::LoadError;
use lockguard_settings::{LockguardConfigV1, Overrides, ResolvedConfig};
use lockguard_types::{
    Finding, LockguardData, LockguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ids,
};
use serde_json::json;
use time::OffsetDateTime;

use crate::report::tool_meta;

/// Where the manifest for sync checks comes from.
#[derive(Clone, Copy, Debug)]
pub enum ManifestSource<'a> {
    /// `package.json` next to the lockfile; silently skipped when absent.
    Beside,
    /// An explicit path; absence is an input error.
    Path(&'a Utf8Path),
    /// Do not compare against a manifest at all.
    Skip,
}

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub lockfile: &'a Utf8Path,
    pub manifest: ManifestSource<'a>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: LockguardReport,
    pub resolved_config: ResolvedConfig,
}

enum ManifestState {
    Loaded(Utf8PathBuf, ManifestDocument),
    Unparsable(Utf8PathBuf, LoadError),
    Absent,
}

/// Run the check use case: parse config, load documents, evaluate rules, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        LockguardConfigV1::default()
    } else {
        lockguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = lockguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    // Any lockfile failure aborts before the engine runs.
    let lockfile = lockguard_repo::load_lockfile(input.lockfile).context("load lockfile")?;
    let manifest = load_manifest(input.lockfile, input.manifest)?;

    let records = lockguard_domain::normalize(&lockfile);
    tracing::info!(
        lockfile = %input.lockfile,
        lockfile_version = lockfile.lockfile_version(),
        packages = records.len(),
        "auditing lockfile"
    );

    let mut findings = Vec::new();
    if lockfile.is_legacy() {
        findings.push(legacy_lockfile_finding(&lockfile));
    }

    let manifest_doc = match &manifest {
        ManifestState::Loaded(_, doc) => Some(doc),
        _ => None,
    };
    findings.extend(lockguard_domain::evaluate_records(
        &records,
        &lockfile,
        manifest_doc,
        &resolved.effective,
    ));

    if let ManifestState::Unparsable(path, err) = &manifest {
        findings.push(manifest_unparsable_finding(path, err));
    }

    let audit = lockguard_domain::aggregate(findings, resolved.effective.strict);
    tracing::info!(
        findings = audit.findings.len(),
        errors = audit.counts.error,
        warnings = audit.counts.warning,
        passed = audit.passed,
        "audit complete"
    );

    let manifest_path = match &manifest {
        ManifestState::Loaded(path, _) | ManifestState::Unparsable(path, _) => {
            Some(path.to_string())
        }
        ManifestState::Absent => None,
    };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: audit.verdict,
        summary: audit.summary(),
        findings: audit.findings,
        data: LockguardData {
            lockfile: input.lockfile.to_string(),
            manifest: manifest_path,
            lockfile_version: lockfile.lockfile_version(),
            packages_scanned: u32::try_from(records.len()).unwrap_or(u32::MAX),
            strict: resolved.effective.strict,
        },
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn load_manifest(
    lockfile: &Utf8Path,
    source: ManifestSource<'_>,
) -> anyhow::Result<ManifestState> {
    let (path, explicit) = match source {
        ManifestSource::Skip => return Ok(ManifestState::Absent),
        ManifestSource::Beside => (lockguard_repo::manifest_beside(lockfile), false),
        ManifestSource::Path(path) => (path.to_owned(), true),
    };

    match lockguard_repo::load_manifest(&path) {
        Ok(doc) => Ok(ManifestState::Loaded(path, doc)),
        Err(LoadError::NotFound { .. }) if !explicit => {
            tracing::debug!(path = %path, "no manifest beside lockfile; skipping sync checks");
            Ok(ManifestState::Absent)
        }
        Err(err @ LoadError::NotFound { .. }) => Err(err).context("load manifest"),
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "manifest unusable; skipping sync checks");
            Ok(ManifestState::Unparsable(path, err))
        }
    }
}

fn legacy_lockfile_finding(lockfile: &LockfileDocument) -> Finding {
    let version = lockfile.lockfile_version();
    Finding {
        severity: Severity::Info,
        check_id: ids::CHECK_LOCKFILE_VERSION.to_string(),
        code: ids::CODE_LEGACY_LOCKFILE.to_string(),
        message: format!("lockfile uses legacy format v{version}"),
        package: None,
        details: None,
        help: Some("Regenerate with npm 7 or newer to get lockfileVersion 2 or 3.".to_string()),
        fingerprint: Some(fingerprint_for(
            ids::CHECK_LOCKFILE_VERSION,
            ids::CODE_LEGACY_LOCKFILE,
            None,
            None,
        )),
        data: json!({ "lockfile_version": version }),
    }
}

fn manifest_unparsable_finding(path: &Utf8Path, err: &LoadError) -> Finding {
    let cause = match err {
        LoadError::Parse { source, .. } => source.to_string(),
        LoadError::Read { source, .. } => source.to_string(),
        LoadError::NotFound { .. } => err.to_string(),
    };
    Finding {
        severity: Severity::Warning,
        check_id: ids::CHECK_SYNC.to_string(),
        code: ids::CODE_MANIFEST_UNPARSABLE.to_string(),
        message: "could not parse manifest for sync check".to_string(),
        package: None,
        details: Some(format!("{path}: {cause}")),
        help: Some("Fix package.json so it is valid JSON.".to_string()),
        fingerprint: Some(fingerprint_for(
            ids::CHECK_SYNC,
            ids::CODE_MANIFEST_UNPARSABLE,
            None,
            None,
        )),
        data: json!({ "manifest": path.as_str() }),
    }
}

/// Map a run outcome to a process exit code: 2 only when gating in CI on a failed audit.
pub fn exit_code(passed: bool, ci: bool) -> i32 {
    if ci && !passed { 2 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockguard_types::Verdict;
    use tempfile::TempDir;

    const CLEAN_V3: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "app", "version": "1.0.0" },
    "node_modules/a": {
      "version": "1.0.0",
      "resolved": "https://registry.npmjs.org/a/-/a-1.0.0.tgz",
      "integrity": "sha512-a"
    },
    "node_modules/b": {
      "version": "2.0.0",
      "resolved": "https://registry.npmjs.org/b/-/b-2.0.0.tgz"
    }
  }
}"#;

    const LEGACY_V1: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "lockfileVersion": 1,
  "dependencies": {
    "a": {
      "version": "1.0.0",
      "resolved": "https://registry.npmjs.org/a/-/a-1.0.0.tgz",
      "integrity": "sha512-a"
    }
  }
}"#;

    struct Project {
        _tmp: TempDir,
        root: Utf8PathBuf,
    }

    impl Project {
        fn new(lockfile: &str) -> Self {
            let tmp = TempDir::new().expect("temp dir");
            let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8");
            std::fs::write(root.join("package-lock.json"), lockfile).expect("write lockfile");
            Project { _tmp: tmp, root }
        }

        fn with_manifest(self, text: &str) -> Self {
            std::fs::write(self.root.join("package.json"), text).expect("write manifest");
            self
        }

        fn lockfile(&self) -> Utf8PathBuf {
            self.root.join("package-lock.json")
        }
    }

    fn check(
        lockfile: &Utf8Path,
        manifest: ManifestSource<'_>,
        config: &str,
    ) -> anyhow::Result<LockguardReport> {
        run_check(CheckInput {
            lockfile,
            manifest,
            config_text: config,
            overrides: Overrides::default(),
        })
        .map(|out| out.report)
    }

    #[test]
    fn warns_on_missing_integrity_and_passes() {
        let project = Project::new(CLEAN_V3);
        let report = check(&project.lockfile(), ManifestSource::Beside, "").unwrap();

        assert_eq!(report.verdict, Verdict::Warn);
        assert!(report.summary.passed);
        assert_eq!(report.summary.warnings, 1);
        assert_eq!(report.data.packages_scanned, 2);
        assert_eq!(report.data.lockfile_version, 3);
        assert!(report.data.manifest.is_none());
    }

    #[test]
    fn strict_config_fails_the_same_lockfile() {
        let project = Project::new(CLEAN_V3);
        let report = check(&project.lockfile(), ManifestSource::Beside, "strict = true").unwrap();

        assert_eq!(report.verdict, Verdict::Fail);
        assert!(!report.summary.passed);
        assert_eq!(report.summary.errors, 1);
        assert!(report.data.strict);
    }

    #[test]
    fn legacy_lockfile_gets_leading_info_finding() {
        let project = Project::new(LEGACY_V1);
        let report = check(&project.lockfile(), ManifestSource::Skip, "").unwrap();

        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].check_id, ids::CHECK_LOCKFILE_VERSION);
        assert_eq!(report.findings[0].severity, Severity::Info);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.data.lockfile_version, 1);
    }

    #[test]
    fn unparsable_manifest_degrades_to_warning() {
        let project = Project::new(CLEAN_V3).with_manifest("{ not json");
        let report = check(&project.lockfile(), ManifestSource::Beside, "").unwrap();

        let last = report.findings.last().unwrap();
        assert_eq!(last.check_id, ids::CHECK_SYNC);
        assert_eq!(last.code, ids::CODE_MANIFEST_UNPARSABLE);
        assert_eq!(last.message, "could not parse manifest for sync check");
        assert!(report.data.manifest.is_some());
    }

    #[test]
    fn manifest_drift_is_reported() {
        let project = Project::new(CLEAN_V3).with_manifest(
            r#"{ "name": "app", "version": "1.0.0", "dependencies": { "a": "^1", "left-pad": "^1" } }"#,
        );
        let report = check(&project.lockfile(), ManifestSource::Beside, "").unwrap();

        let missing: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.code == ids::CODE_MISSING_FROM_LOCKFILE)
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].message.contains("left-pad"));
        assert!(!report.summary.passed);
    }

    #[test]
    fn explicit_missing_manifest_is_an_error() {
        let project = Project::new(CLEAN_V3);
        let path = project.root.join("nope.json");
        let err = check(&project.lockfile(), ManifestSource::Path(&path), "").unwrap_err();
        assert!(format!("{err:#}").contains("load manifest"));
    }

    #[test]
    fn malformed_lockfile_is_an_error() {
        let project = Project::new("{");
        let err = check(&project.lockfile(), ManifestSource::Beside, "").unwrap_err();
        assert!(format!("{err:#}").contains("load lockfile"));
    }

    #[test]
    fn bad_config_is_an_error() {
        let project = Project::new(CLEAN_V3);
        let err =
            check(&project.lockfile(), ManifestSource::Beside, "profile = \"nope\"").unwrap_err();
        assert!(format!("{err:#}").contains("unknown profile"));
    }

    #[test]
    fn exit_code_only_gates_in_ci() {
        assert_eq!(exit_code(true, true), 0);
        assert_eq!(exit_code(false, false), 0);
        assert_eq!(exit_code(false, true), 2);
    }
}
