//! Explain registry for rules and codes.
//!
//! Maps rule IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after lockfile or manifest snippets.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Snippet that would trigger a finding.
    pub before: &'static str,
    /// Snippet that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule ID or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rules
        ids::CHECK_REGISTRY_URL | ids::CODE_UNTRUSTED_REGISTRY => Some(explain_registry_url()),
        ids::CHECK_GIT_PROTOCOL => Some(explain_git_protocol()),
        ids::CHECK_HTTPS_ONLY | ids::CODE_INSECURE_HTTP => Some(explain_https_only()),
        ids::CHECK_INTEGRITY | ids::CODE_MISSING_INTEGRITY => Some(explain_integrity()),
        ids::CHECK_NO_FILE_REFS | ids::CODE_FILE_REFERENCE => Some(explain_no_file_refs()),
        ids::CHECK_SYNC => Some(explain_sync_check()),
        ids::CHECK_LOCKFILE_VERSION | ids::CODE_LEGACY_LOCKFILE => Some(explain_legacy_lockfile()),

        // Codes with a dedicated entry
        ids::CODE_GIT_PROTOCOL => Some(explain_git_plain()),
        ids::CODE_GIT_SSH_PROTOCOL => Some(explain_git_ssh()),
        ids::CODE_GITHUB_REFERENCE => Some(explain_github_reference()),
        ids::CODE_NAME_MISMATCH => Some(explain_name_mismatch()),
        ids::CODE_VERSION_MISMATCH => Some(explain_version_mismatch()),
        ids::CODE_MISSING_FROM_LOCKFILE => Some(explain_missing_from_lockfile()),
        ids::CODE_MANIFEST_UNPARSABLE => Some(explain_manifest_unparsable()),

        _ => None,
    }
}

/// List all known rule IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_REGISTRY_URL,
        ids::CHECK_GIT_PROTOCOL,
        ids::CHECK_HTTPS_ONLY,
        ids::CHECK_INTEGRITY,
        ids::CHECK_NO_FILE_REFS,
        ids::CHECK_SYNC,
        ids::CHECK_LOCKFILE_VERSION,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_UNTRUSTED_REGISTRY,
        ids::CODE_GIT_PROTOCOL,
        ids::CODE_GIT_SSH_PROTOCOL,
        ids::CODE_GITHUB_REFERENCE,
        ids::CODE_INSECURE_HTTP,
        ids::CODE_MISSING_INTEGRITY,
        ids::CODE_FILE_REFERENCE,
        ids::CODE_NAME_MISMATCH,
        ids::CODE_VERSION_MISMATCH,
        ids::CODE_MISSING_FROM_LOCKFILE,
        ids::CODE_MANIFEST_UNPARSABLE,
        ids::CODE_LEGACY_LOCKFILE,
    ]
}

// --- Rule-level explanations ---

fn explain_registry_url() -> Explanation {
    Explanation {
        title: "Trusted Registry Origins",
        description: "\
Detects packages whose `resolved` URL does not start with a trusted registry prefix.

The built-in trusted prefixes are `https://registry.npmjs.org/` and
`https://registry.yarnpkg.com/`. Anything else may point at a typo-squatted mirror,
a compromised proxy, or an attacker-controlled host. Workspace links are exempt.",
        remediation: "\
Reinstall the package from the official registry, or add your private registry
prefix to `allowed_registries` in lockguard.toml (or pass `--allowed-registry`).",
        examples: ExamplePair {
            before: r#""node_modules/foo": {
  "resolved": "https://evil.example.com/foo/-/foo-1.0.0.tgz"
}"#,
            after: r#""node_modules/foo": {
  "resolved": "https://registry.npmjs.org/foo/-/foo-1.0.0.tgz"
}"#,
        },
    }
}

fn explain_git_protocol() -> Explanation {
    Explanation {
        title: "Git and GitHub Sources",
        description: "\
Detects packages fetched over git transports or directly from GitHub.

- `git://` is unauthenticated and unencrypted (error).
- `git+ssh://` bypasses registry integrity guarantees (warning).
- Direct `github.com` references skip the registry and can be re-pointed (warning).

Each sub-check is independent, so one package may produce several findings.",
        remediation: "\
Depend on a published registry version instead, or opt in explicitly with
`allow_git` / `allow_github` when git sources are intended.",
        examples: ExamplePair {
            before: r#""resolved": "git://github.com/user/repo.git#abc123""#,
            after: r#""resolved": "https://registry.npmjs.org/repo/-/repo-1.2.0.tgz""#,
        },
    }
}

fn explain_https_only() -> Explanation {
    Explanation {
        title: "HTTPS Only",
        description: "\
Detects packages resolved over plain `http://`.

Plain HTTP allows anyone on the network path to substitute the tarball.",
        remediation: "Regenerate the lockfile with an `https://` registry URL.",
        examples: ExamplePair {
            before: r#""resolved": "http://registry.npmjs.org/foo/-/foo-1.0.0.tgz""#,
            after: r#""resolved": "https://registry.npmjs.org/foo/-/foo-1.0.0.tgz""#,
        },
    }
}

fn explain_integrity() -> Explanation {
    Explanation {
        title: "Integrity Hashes",
        description: "\
Detects fetched packages without an `integrity` digest.

Without a digest the package manager cannot detect a tampered tarball. A single
aggregate finding is emitted that lists up to ten affected packages.",
        remediation: "\
Delete node_modules and regenerate the lockfile with a current npm so every
entry carries an `integrity` field.",
        examples: ExamplePair {
            before: r#""node_modules/foo": {
  "resolved": "https://registry.npmjs.org/foo/-/foo-1.0.0.tgz"
}"#,
            after: r#""node_modules/foo": {
  "resolved": "https://registry.npmjs.org/foo/-/foo-1.0.0.tgz",
  "integrity": "sha512-..."
}"#,
        },
    }
}

fn explain_no_file_refs() -> Explanation {
    Explanation {
        title: "No File References",
        description: "\
Detects packages resolved from `file:` paths.

Local file references are not reproducible on other machines and bypass the
registry entirely. Unlike the other transport rules, workspace links are not exempt.",
        remediation: "Publish the package or convert it into a workspace member.",
        examples: ExamplePair {
            before: r#""resolved": "file:../local-pkg""#,
            after: r#""resolved": "https://registry.npmjs.org/local-pkg/-/local-pkg-1.0.0.tgz""#,
        },
    }
}

fn explain_sync_check() -> Explanation {
    Explanation {
        title: "Manifest / Lockfile Sync",
        description: "\
Cross-checks package.json against the lockfile.

- Different `name` values are an error.
- Different `version` values are a warning.
- A dependency declared in the manifest but absent from the lockfile is an error.

Lockfile entries missing from the manifest are expected (transitive dependencies)
and are not reported.",
        remediation: "Run `npm install` and commit the regenerated lockfile.",
        examples: ExamplePair {
            before: r#"// package.json
"dependencies": { "left-pad": "^1.3.0" }
// package-lock.json has no node_modules/left-pad"#,
            after: r#"// package-lock.json
"node_modules/left-pad": { "version": "1.3.0" }"#,
        },
    }
}

fn explain_legacy_lockfile() -> Explanation {
    Explanation {
        title: "Legacy Lockfile Format",
        description: "\
Reports lockfiles using `lockfileVersion` 1 (or no version at all).

The legacy format is still audited, but newer formats record workspace links and
nested packages more precisely.",
        remediation: "Regenerate the lockfile with npm 7 or newer.",
        examples: ExamplePair {
            before: r#""lockfileVersion": 1"#,
            after: r#""lockfileVersion": 3"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_git_plain() -> Explanation {
    Explanation {
        title: "Unencrypted git:// Source",
        description: "\
The package is fetched over the `git://` protocol, which has no authentication
and no transport encryption.",
        remediation: "Use a registry version, or set `allow_git = true` if this is intended.",
        examples: ExamplePair {
            before: r#""resolved": "git://github.com/user/repo.git""#,
            after: r#""resolved": "https://registry.npmjs.org/repo/-/repo-1.0.0.tgz""#,
        },
    }
}

fn explain_git_ssh() -> Explanation {
    Explanation {
        title: "git+ssh Source",
        description: "\
The package is fetched over `git+ssh://`. The transport is authenticated, but
the content is not covered by registry integrity metadata.",
        remediation: "Use a registry version, or set `allow_git = true` if this is intended.",
        examples: ExamplePair {
            before: r#""resolved": "git+ssh://git@github.com/user/repo.git""#,
            after: r#""resolved": "https://registry.npmjs.org/repo/-/repo-1.0.0.tgz""#,
        },
    }
}

fn explain_github_reference() -> Explanation {
    Explanation {
        title: "Direct GitHub Reference",
        description: "\
The package is fetched straight from github.com rather than from a registry.
Branches and tags can be moved after the lockfile is written.",
        remediation: "Use a registry version, or set `allow_github = true` if this is intended.",
        examples: ExamplePair {
            before: r#""resolved": "https://github.com/user/repo/archive/main.tar.gz""#,
            after: r#""resolved": "https://registry.npmjs.org/repo/-/repo-1.0.0.tgz""#,
        },
    }
}

fn explain_name_mismatch() -> Explanation {
    Explanation {
        title: "Project Name Mismatch",
        description: "\
The lockfile `name` differs from the manifest `name`. The lockfile was most
likely generated for a different project or copied in by mistake.",
        remediation: "Regenerate the lockfile from this project's package.json.",
        examples: ExamplePair {
            before: r#"package.json: "name": "app"
package-lock.json: "name": "other-app""#,
            after: r#"package.json: "name": "app"
package-lock.json: "name": "app""#,
        },
    }
}

fn explain_version_mismatch() -> Explanation {
    Explanation {
        title: "Project Version Drift",
        description: "\
The lockfile `version` differs from the manifest `version`. This is drift
rather than a supply-chain risk, so it is reported as a warning.",
        remediation: "Run `npm install` after bumping the version in package.json.",
        examples: ExamplePair {
            before: r#"package.json: "version": "1.0.1"
package-lock.json: "version": "1.0.0""#,
            after: r#"package.json: "version": "1.0.1"
package-lock.json: "version": "1.0.1""#,
        },
    }
}

fn explain_missing_from_lockfile() -> Explanation {
    Explanation {
        title: "Dependency Missing From Lockfile",
        description: "\
A dependency declared in package.json (dependencies or devDependencies) has no
entry at any depth of the lockfile. Installs will resolve it freshly, without
any pinned version or integrity digest.",
        remediation: "Run `npm install` and commit the updated lockfile.",
        examples: ExamplePair {
            before: r#""dependencies": { "left-pad": "^1.3.0" }
// no node_modules/left-pad in the lockfile"#,
            after: r#""node_modules/left-pad": { "version": "1.3.0", "integrity": "sha512-..." }"#,
        },
    }
}

fn explain_manifest_unparsable() -> Explanation {
    Explanation {
        title: "Manifest Could Not Be Parsed",
        description: "\
package.json exists but is not valid JSON (or has an unexpected shape), so the
sync check was skipped. All other rules still ran.",
        remediation: "Fix the JSON syntax in package.json and re-run lockguard.",
        examples: ExamplePair {
            before: r#"{ "name": "app", }"#,
            after: r#"{ "name": "app" }"#,
        },
    }
}
