use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

/// Lockfile names npm writes, in lookup order.
pub const LOCKFILE_NAMES: &[&str] = &["package-lock.json", "npm-shrinkwrap.json"];

pub const MANIFEST_NAME: &str = "package.json";

pub const CONFIG_NAME: &str = "lockguard.toml";

/// Find the lockfile in `dir`. `package-lock.json` wins when both exist.
pub fn discover_lockfile(dir: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {dir}");
    }

    let found = LOCKFILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .with_context(|| format!("no {} found in {dir}", LOCKFILE_NAMES.join(" or ")))?;

    tracing::debug!(path = %found, "discovered lockfile");
    Ok(found)
}

/// `package.json` next to the given lockfile.
pub fn manifest_beside(lockfile: &Utf8Path) -> Utf8PathBuf {
    beside(lockfile, MANIFEST_NAME)
}

/// `lockguard.toml` next to the given lockfile.
pub fn config_beside(lockfile: &Utf8Path) -> Utf8PathBuf {
    beside(lockfile, CONFIG_NAME)
}

fn beside(lockfile: &Utf8Path, name: &str) -> Utf8PathBuf {
    match lockfile.parent() {
        Some(parent) => parent.join(name),
        None => Utf8PathBuf::from(name),
    }
}
