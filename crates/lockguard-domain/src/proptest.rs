//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - v1 and v2 lockfiles describing the same tree producing the same findings
//! - Repeated runs over the same input producing the same output
//! - Strict escalation never loosening a verdict
//! - Link records being exempt from the fetch-origin rules

use crate::checks::{Rule, RuleInput, run_all};
use crate::engine::{audit, evaluate, evaluate_records};
use crate::model::{LegacyDependency, LockfileDocument, PackageEntry, PackageMap, PackageRecord};
use crate::normalize::{child_key, normalize};
use crate::policy::RunConfiguration;
use crate::report::aggregate;
use crate::test_support::{TEST_INTEGRITY, manifest};
use lockguard_types::{Finding, Severity, ids};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-z][a-z0-9-]{0,11}").unwrap(),
        1 => prop::string::string_regex("@[a-z]{1,6}/[a-z][a-z0-9-]{0,7}").unwrap(),
    ]
}

/// Resolved URLs covering every origin class the rules distinguish.
fn arb_resolved() -> impl Strategy<Value = String> {
    let name = "[a-z]{1,8}";
    prop_oneof![
        4 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("https://registry.npmjs.org/{n}/-/{n}-1.0.0.tgz")),
        1 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("http://registry.npmjs.org/{n}/-/{n}-1.0.0.tgz")),
        1 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("https://mirror.example.com/{n}.tgz")),
        1 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("git://github.com/user/{n}.git")),
        1 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("git+ssh://git@example.com/team/{n}.git")),
        1 => prop::string::string_regex(name)
            .unwrap()
            .prop_map(|n| format!("file:../{n}")),
    ]
}

/// One node of a dependency tree, convertible to either lockfile shape.
#[derive(Clone, Debug)]
struct Node {
    resolved: String,
    has_integrity: bool,
    children: BTreeMap<String, Node>,
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = (arb_resolved(), any::<bool>()).prop_map(|(resolved, has_integrity)| Node {
        resolved,
        has_integrity,
        children: BTreeMap::new(),
    });
    leaf.prop_recursive(3, 32, 4, |inner| {
        (
            arb_resolved(),
            any::<bool>(),
            prop::collection::btree_map(arb_name(), inner, 0..4),
        )
            .prop_map(|(resolved, has_integrity, children)| Node {
                resolved,
                has_integrity,
                children,
            })
    })
}

fn arb_tree() -> impl Strategy<Value = BTreeMap<String, Node>> {
    prop::collection::btree_map(arb_name(), arb_node(), 0..6)
}

fn integrity(node: &Node) -> Option<String> {
    node.has_integrity.then(|| TEST_INTEGRITY.to_string())
}

fn to_legacy(tree: &BTreeMap<String, Node>) -> BTreeMap<String, LegacyDependency> {
    tree.iter()
        .map(|(name, node)| {
            let dependencies = (!node.children.is_empty()).then(|| to_legacy(&node.children));
            (
                name.clone(),
                LegacyDependency {
                    version: Some("1.0.0".to_string()),
                    resolved: Some(node.resolved.clone()),
                    integrity: integrity(node),
                    dev: false,
                    dependencies,
                },
            )
        })
        .collect()
}

fn to_packages(prefix: &str, tree: &BTreeMap<String, Node>, out: &mut BTreeMap<String, PackageEntry>) {
    for (name, node) in tree {
        let key = child_key(prefix, name);
        out.insert(
            key.clone(),
            PackageEntry {
                version: Some("1.0.0".to_string()),
                resolved: Some(node.resolved.clone()),
                integrity: integrity(node),
                link: false,
                dev: false,
            },
        );
        to_packages(&key, &node.children, out);
    }
}

fn v1_document(tree: &BTreeMap<String, Node>) -> LockfileDocument {
    LockfileDocument {
        name: Some("app".to_string()),
        version: Some("1.0.0".to_string()),
        lockfile_version: Some(1),
        packages: None,
        dependencies: Some(to_legacy(tree)),
    }
}

fn v3_document(tree: &BTreeMap<String, Node>) -> LockfileDocument {
    let mut packages = BTreeMap::from([(String::new(), PackageEntry::default())]);
    to_packages("", tree, &mut packages);
    LockfileDocument {
        name: Some("app".to_string()),
        version: Some("1.0.0".to_string()),
        lockfile_version: Some(3),
        packages: Some(packages),
        dependencies: None,
    }
}

fn arb_config() -> impl Strategy<Value = RunConfiguration> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(allow_git, allow_github, strict)| {
        RunConfiguration {
            allowed_registries: Vec::new(),
            allow_git,
            allow_github,
            strict,
        }
    })
}

fn arb_finding() -> impl Strategy<Value = Finding> {
    (
        prop_oneof![
            Just(Severity::Info),
            Just(Severity::Warning),
            Just(Severity::Error),
        ],
        prop::sample::select(Rule::ALL.map(Rule::id).to_vec()),
    )
        .prop_map(|(severity, check_id)| Finding {
            severity,
            check_id: check_id.to_string(),
            code: "generated".to_string(),
            message: "generated finding".to_string(),
            package: None,
            details: None,
            help: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        })
}

fn count_nodes(tree: &BTreeMap<String, Node>) -> usize {
    tree.values().map(|n| 1 + count_nodes(&n.children)).sum()
}

// ============================================================================
// Normalization
// ============================================================================

proptest! {
    /// Flattening a v1 tree yields the same key space as the equivalent v3 packages map.
    #[test]
    fn v1_and_v3_normalize_identically(tree in arb_tree()) {
        let v1 = normalize(&v1_document(&tree));
        let v3 = normalize(&v3_document(&tree));

        prop_assert_eq!(v1.len(), count_nodes(&tree));
        prop_assert_eq!(&v1, &v3);
    }

    /// Same tree, either format: identical findings in identical order.
    #[test]
    fn findings_do_not_depend_on_lockfile_format(tree in arb_tree(), cfg in arb_config()) {
        let from_v1 = evaluate(&v1_document(&tree), None, &cfg);
        let from_v3 = evaluate(&v3_document(&tree), None, &cfg);
        prop_assert_eq!(from_v1, from_v3);
    }

    /// Every record key is a `node_modules/` install path.
    #[test]
    fn record_keys_are_install_paths(tree in arb_tree()) {
        for (key, record) in normalize(&v1_document(&tree)) {
            prop_assert!(key.starts_with("node_modules/"), "unexpected key {}", key);
            prop_assert_eq!(&key, &record.key);
        }
    }
}

// ============================================================================
// Rule evaluation
// ============================================================================

proptest! {
    /// Running twice over the same lockfile and manifest gives identical output.
    #[test]
    fn evaluate_is_idempotent(
        tree in arb_tree(),
        cfg in arb_config(),
        extra in prop::collection::vec(arb_name(), 0..3),
    ) {
        let lockfile = v3_document(&tree);
        let mut deps: Vec<&str> = tree.keys().map(String::as_str).collect();
        deps.extend(extra.iter().map(String::as_str));
        let man = manifest(Some("app"), Some("1.0.0"), &deps, &[]);

        let first = evaluate(&lockfile, Some(&man), &cfg);
        let second = evaluate(&lockfile, Some(&man), &cfg);
        prop_assert_eq!(first, second);

        let first = audit(&lockfile, Some(&man), &cfg);
        let second = audit(&lockfile, Some(&man), &cfg);
        prop_assert_eq!(first.findings, second.findings);
        prop_assert_eq!(first.verdict, second.verdict);
        prop_assert_eq!(first.counts, second.counts);
    }

    /// The parallel evaluator matches a plain sequential pass.
    #[test]
    fn parallel_matches_sequential(tree in arb_tree(), cfg in arb_config()) {
        let lockfile = v3_document(&tree);
        let records = normalize(&lockfile);

        let parallel = evaluate_records(&records, &lockfile, None, &cfg);
        let mut sequential = Vec::new();
        run_all(
            &RuleInput { records: &records, lockfile: &lockfile, manifest: None, config: &cfg },
            &mut sequential,
        );
        prop_assert_eq!(parallel, sequential);
    }

    /// The integrity rule reports at most once, however many records lack a hash.
    #[test]
    fn integrity_reports_at_most_once(tree in arb_tree()) {
        let findings = evaluate(&v3_document(&tree), None, &RunConfiguration::default());
        let integrity: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.check_id == ids::CHECK_INTEGRITY)
            .collect();
        prop_assert!(integrity.len() <= 1);
    }

    /// Per-package findings always point at a record that exists.
    #[test]
    fn findings_reference_known_records(tree in arb_tree(), cfg in arb_config()) {
        let lockfile = v3_document(&tree);
        let records = normalize(&lockfile);
        for finding in evaluate_records(&records, &lockfile, None, &cfg) {
            if let Some(package) = &finding.package {
                prop_assert!(records.contains_key(package), "unknown package {}", package);
            }
        }
    }

    /// A link record never trips registry-url, https-only, or integrity.
    #[test]
    fn links_are_exempt_from_fetch_rules(resolved in arb_resolved()) {
        let record = PackageRecord {
            key: "node_modules/linked".to_string(),
            version: None,
            resolved: Some(resolved),
            integrity: None,
            link: true,
            dev: false,
        };
        let records: PackageMap = BTreeMap::from([(record.key.clone(), record)]);
        let lockfile = LockfileDocument::default();
        let cfg = RunConfiguration::default();
        let input = RuleInput { records: &records, lockfile: &lockfile, manifest: None, config: &cfg };

        for rule in [Rule::RegistryUrl, Rule::HttpsOnly, Rule::Integrity] {
            prop_assert!(rule.evaluate(&input).is_empty(), "{} fired on a link", rule.id());
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

proptest! {
    /// Strict mode only ever moves warnings into errors.
    #[test]
    fn strict_never_loosens(findings in prop::collection::vec(arb_finding(), 0..24)) {
        let lenient = aggregate(findings.clone(), false);
        let strict = aggregate(findings, true);

        prop_assert_eq!(strict.counts.warning, 0);
        prop_assert_eq!(strict.counts.info, lenient.counts.info);
        prop_assert_eq!(strict.counts.error, lenient.counts.error + lenient.counts.warning);
        if !lenient.passed {
            prop_assert!(!strict.passed);
        }
    }

    /// `passed` is exactly "no errors after escalation".
    #[test]
    fn passed_tracks_error_count(findings in prop::collection::vec(arb_finding(), 0..24), strict in any::<bool>()) {
        let report = aggregate(findings, strict);
        prop_assert_eq!(report.passed, report.counts.error == 0);
        prop_assert_eq!(report.findings.len() as u32,
            report.counts.info + report.counts.warning + report.counts.error);
    }
}
