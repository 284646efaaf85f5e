//! Stable identifiers for rules and finding codes.
//!
//! `check_id` is the kebab-case rule name. `code` is a short snake_case discriminator.

// Rules
pub const CHECK_REGISTRY_URL: &str = "registry-url";
pub const CHECK_GIT_PROTOCOL: &str = "git-protocol";
pub const CHECK_HTTPS_ONLY: &str = "https-only";
pub const CHECK_INTEGRITY: &str = "integrity";
pub const CHECK_NO_FILE_REFS: &str = "no-file-refs";
pub const CHECK_SYNC: &str = "sync-check";

// Codes: registry-url
pub const CODE_UNTRUSTED_REGISTRY: &str = "untrusted_registry";

// Codes: git-protocol
pub const CODE_GIT_PROTOCOL: &str = "git_protocol";
pub const CODE_GIT_SSH_PROTOCOL: &str = "git_ssh_protocol";
pub const CODE_GITHUB_REFERENCE: &str = "github_reference";

// Codes: https-only
pub const CODE_INSECURE_HTTP: &str = "insecure_http";

// Codes: integrity
pub const CODE_MISSING_INTEGRITY: &str = "missing_integrity";

// Codes: no-file-refs
pub const CODE_FILE_REFERENCE: &str = "file_reference";

// Codes: sync-check
pub const CODE_NAME_MISMATCH: &str = "name_mismatch";
pub const CODE_VERSION_MISMATCH: &str = "version_mismatch";
pub const CODE_MISSING_FROM_LOCKFILE: &str = "missing_from_lockfile";
pub const CODE_MANIFEST_UNPARSABLE: &str = "manifest_unparsable";

// Caller-level
pub const CHECK_LOCKFILE_VERSION: &str = "lockfile-version";
pub const CODE_LEGACY_LOCKFILE: &str = "legacy_lockfile";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool-runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
