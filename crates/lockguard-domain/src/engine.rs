use crate::checks::{Rule, RuleInput};
use crate::model::{LockfileDocument, ManifestDocument, PackageMap};
use crate::normalize::normalize;
use crate::policy::RunConfiguration;
use crate::report::{AuditReport, aggregate};
use lockguard_types::Finding;
use rayon::prelude::*;

/// Normalize the lockfile and run every rule against it.
pub fn evaluate(
    lockfile: &LockfileDocument,
    manifest: Option<&ManifestDocument>,
    cfg: &RunConfiguration,
) -> Vec<Finding> {
    let records = normalize(lockfile);
    evaluate_records(&records, lockfile, manifest, cfg)
}

/// Run every rule against already-normalized records.
///
/// Rules are evaluated in parallel; the indexed collect keeps rule order, so the
/// output is identical to a sequential run.
pub fn evaluate_records(
    records: &PackageMap,
    lockfile: &LockfileDocument,
    manifest: Option<&ManifestDocument>,
    cfg: &RunConfiguration,
) -> Vec<Finding> {
    let input = RuleInput {
        records,
        lockfile,
        manifest,
        config: cfg,
    };

    let per_rule: Vec<Vec<Finding>> = Rule::ALL
        .par_iter()
        .map(|rule| rule.evaluate(&input))
        .collect();

    per_rule.into_iter().flatten().collect()
}

/// Normalize, evaluate, and aggregate in one call.
pub fn audit(
    lockfile: &LockfileDocument,
    manifest: Option<&ManifestDocument>,
    cfg: &RunConfiguration,
) -> AuditReport {
    aggregate(evaluate(lockfile, manifest, cfg), cfg.strict)
}
