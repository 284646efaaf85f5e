/// Registry prefixes trusted without any configuration.
pub const OFFICIAL_REGISTRIES: &[&str] = &[
    "https://registry.npmjs.org/",
    "https://registry.yarnpkg.com/",
];

/// Caller-supplied knobs for one run. Immutable while the rules execute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Extra registry URL prefixes trusted in addition to [`OFFICIAL_REGISTRIES`].
    pub allowed_registries: Vec<String>,
    /// Permit `git://` and `git+ssh://` sources.
    pub allow_git: bool,
    /// Permit direct github.com references.
    pub allow_github: bool,
    /// Escalate warnings to errors.
    pub strict: bool,
}

impl RunConfiguration {
    pub fn trusted_registries(&self) -> impl Iterator<Item = &str> {
        OFFICIAL_REGISTRIES
            .iter()
            .copied()
            .chain(self.allowed_registries.iter().map(String::as_str))
    }

    /// Prefix match, so registries served below a path (`https://host/npm/`) work.
    pub fn is_trusted_registry(&self, url: &str) -> bool {
        self.trusted_registries().any(|prefix| url.starts_with(prefix))
    }
}
