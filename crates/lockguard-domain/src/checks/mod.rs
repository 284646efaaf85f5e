use crate::model::{LockfileDocument, ManifestDocument, PackageMap};
use crate::policy::RunConfiguration;
use lockguard_types::{Finding, ids};

mod git_protocol;
mod https_only;
mod integrity;
mod no_file_refs;
mod registry_url;
mod sync_check;


/// Everything a rule may read. Shared immutably between rules.
#[derive(Clone, Copy, Debug)]
pub struct RuleInput<'a> {
    pub records: &'a PackageMap,
    pub lockfile: &'a LockfileDocument,
    pub manifest: Option<&'a ManifestDocument>,
    pub config: &'a RunConfiguration,
}

/// The closed rule set, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    RegistryUrl,
    GitProtocol,
    HttpsOnly,
    Integrity,
    NoFileRefs,
    SyncCheck,
}

impl Rule {
    pub const ALL: [Rule; 6] = [
        Rule::RegistryUrl,
        Rule::GitProtocol,
        Rule::HttpsOnly,
        Rule::Integrity,
        Rule::NoFileRefs,
        Rule::SyncCheck,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Rule::RegistryUrl => ids::CHECK_REGISTRY_URL,
            Rule::GitProtocol => ids::CHECK_GIT_PROTOCOL,
            Rule::HttpsOnly => ids::CHECK_HTTPS_ONLY,
            Rule::Integrity => ids::CHECK_INTEGRITY,
            Rule::NoFileRefs => ids::CHECK_NO_FILE_REFS,
            Rule::SyncCheck => ids::CHECK_SYNC,
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn evaluate(self, input: &RuleInput<'_>) -> Vec<Finding> {
        let mut out = Vec::new();
        match self {
            Rule::RegistryUrl => registry_url::run(input.records, input.config, &mut out),
            Rule::GitProtocol => git_protocol::run(input.records, input.config, &mut out),
            Rule::HttpsOnly => https_only::run(input.records, &mut out),
            Rule::Integrity => integrity::run(input.records, &mut out),
            Rule::NoFileRefs => no_file_refs::run(input.records, &mut out),
            Rule::SyncCheck => {
                sync_check::run(input.records, input.lockfile, input.manifest, &mut out)
            }
        }
        out
    }
}

/// Run every rule sequentially, appending in rule order.
pub fn run_all(input: &RuleInput<'_>, out: &mut Vec<Finding>) {
    for rule in Rule::ALL {
        out.extend(rule.evaluate(input));
    }
}
