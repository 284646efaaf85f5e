use crate::fingerprint::fingerprint_for;
use crate::model::PackageMap;
use crate::policy::RunConfiguration;
use lockguard_types::{Finding, Severity, ids};
use serde_json::json;

pub fn run(records: &PackageMap, cfg: &RunConfiguration, out: &mut Vec<Finding>) {
    for record in records.values() {
        let Some(url) = record.fetched_url() else {
            continue;
        };
        if cfg.is_trusted_registry(url) {
            continue;
        }

        out.push(Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_REGISTRY_URL.to_string(),
            code: ids::CODE_UNTRUSTED_REGISTRY.to_string(),
            message: format!(
                "package '{}' is resolved from an untrusted registry",
                record.key
            ),
            package: Some(record.key.clone()),
            details: Some(url.to_string()),
            help: Some(
                "Reinstall from the official registry, or add the registry prefix to `allowed_registries`."
                    .to_string(),
            ),
            fingerprint: Some(fingerprint_for(
                ids::CHECK_REGISTRY_URL,
                ids::CODE_UNTRUSTED_REGISTRY,
                Some(&record.key),
                Some(url),
            )),
            data: json!({
                "package": record.key,
                "resolved": url,
                "trusted_prefixes": cfg.trusted_registries().collect::<Vec<_>>(),
            }),
        });
    }
}
