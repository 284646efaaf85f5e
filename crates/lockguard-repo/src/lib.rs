//! Repository adapters: locate the lockfile and decode lockfile/manifest documents.
//!
//! This crate is allowed to do filesystem IO. Everything downstream of it works on
//! decoded documents only.

#![forbid(unsafe_code)]

mod discover;
mod load;

pub use discover::{
    CONFIG_NAME, LOCKFILE_NAMES, MANIFEST_NAME, config_beside, discover_lockfile, manifest_beside,
};
pub use load::{LoadError, load_lockfile, load_manifest};

/// Fuzz-friendly API for testing decoding robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use lockguard_domain::model::LockfileDocument;

    /// Decode arbitrary text as a lockfile and normalize it.
    ///
    /// Returns the number of normalized records. **Never panics** on any input.
    pub fn parse_lockfile(text: &str) -> anyhow::Result<usize> {
        let doc: LockfileDocument = serde_json::from_str(text)?;
        Ok(lockguard_domain::normalize(&doc).len())
    }
}
