use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields, always in four positional slots (absent ones are empty):
/// - check_id
/// - code
/// - package key (if the finding is about one package)
/// - salient detail, e.g. the resolved URL (if present)
pub fn fingerprint_for(
    check_id: &str,
    code: &str,
    package: Option<&str>,
    detail: Option<&str>,
) -> String {
    let canonical = [
        check_id,
        code,
        package.unwrap_or_default(),
        detail.unwrap_or_default(),
    ]
    .join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
