use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "lockguard.config.v1";

/// `lockguard.toml` schema v1.
///
/// Every field is optional; an empty file resolves to the `default` profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LockguardConfigV1 {
    /// Optional schema marker; when present it must be `lockguard.config.v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `default`, `strict`, or `permissive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Registry URL prefixes trusted in addition to the public npm and yarn registries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_registries: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_git: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_github: Option<bool>,

    /// Escalate warnings to errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}
