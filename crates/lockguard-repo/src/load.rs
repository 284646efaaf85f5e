use camino::{Utf8Path, Utf8PathBuf};
use lockguard_domain::model::{LockfileDocument, ManifestDocument};
use serde::de::DeserializeOwned;

/// Why a document could not be loaded.
///
/// Callers treat these differently per document: any lockfile failure aborts the
/// run, while a manifest that exists but does not parse only disables sync checks.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{path} does not exist")]
    NotFound { path: Utf8PathBuf },

    #[error("failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as JSON")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Read { path, .. }
            | LoadError::Parse { path, .. } => path,
        }
    }
}

pub fn load_lockfile(path: &Utf8Path) -> Result<LockfileDocument, LoadError> {
    let doc: LockfileDocument = load_json(path)?;
    tracing::debug!(
        path = %path,
        lockfile_version = doc.lockfile_version(),
        "loaded lockfile"
    );
    Ok(doc)
}

pub fn load_manifest(path: &Utf8Path) -> Result<ManifestDocument, LoadError> {
    let doc: ManifestDocument = load_json(path)?;
    tracing::debug!(
        path = %path,
        dependencies = doc.dependencies.len(),
        dev_dependencies = doc.dev_dependencies.len(),
        "loaded manifest"
    );
    Ok(doc)
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_owned(),
            }
        } else {
            LoadError::Read {
                path: path.to_owned(),
                source,
            }
        }
    })?;

    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}
