use crate::model::{LockguardConfigV1, SCHEMA_CONFIG_V1};
use crate::presets;
use anyhow::Context;
use lockguard_domain::policy::RunConfiguration;

/// Values supplied on the command line. Booleans can only switch a knob on.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub allowed_registries: Vec<String>,
    pub allow_git: bool,
    pub allow_github: bool,
    pub strict: bool,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub profile: String,
    pub effective: RunConfiguration,
}

pub fn resolve_config(
    cfg: LockguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected one of {})",
            presets::PROFILES.join(", ")
        )
    })?;

    // File values replace preset booleans; CLI flags can only add.
    if let Some(allow_git) = cfg.allow_git {
        effective.allow_git = allow_git;
    }
    if let Some(allow_github) = cfg.allow_github {
        effective.allow_github = allow_github;
    }
    if let Some(strict) = cfg.strict {
        effective.strict = strict;
    }
    effective.allow_git |= overrides.allow_git;
    effective.allow_github |= overrides.allow_github;
    effective.strict |= overrides.strict;

    for prefix in cfg.allowed_registries.iter().chain(&overrides.allowed_registries) {
        validate_registry(prefix)?;
        if !effective.allowed_registries.contains(prefix) {
            effective.allowed_registries.push(prefix.clone());
        }
    }

    Ok(ResolvedConfig { profile, effective })
}

fn validate_registry(prefix: &str) -> anyhow::Result<()> {
    if prefix.starts_with("https://") || prefix.starts_with("http://") {
        return Ok(());
    }
    anyhow::bail!("invalid allowed registry: {prefix} (expected an http:// or https:// URL prefix)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default_profile() {
        let resolved = resolve_config(LockguardConfigV1::default(), Overrides::default()).unwrap();
        assert_eq!(resolved.profile, "default");
        assert_eq!(resolved.effective, RunConfiguration::default());
    }

    #[test]
    fn cli_profile_beats_file_profile() {
        let cfg = LockguardConfigV1 {
            profile: Some("permissive".to_string()),
            ..LockguardConfigV1::default()
        };
        let overrides = Overrides {
            profile: Some("strict".to_string()),
            ..Overrides::default()
        };
        let resolved = resolve_config(cfg, overrides).unwrap();
        assert_eq!(resolved.profile, "strict");
        assert!(resolved.effective.strict);
        assert!(!resolved.effective.allow_git);
    }

    #[test]
    fn file_can_switch_off_preset_flag_but_cli_switches_it_back_on() {
        let cfg = LockguardConfigV1 {
            profile: Some("permissive".to_string()),
            allow_git: Some(false),
            ..LockguardConfigV1::default()
        };
        let resolved = resolve_config(cfg.clone(), Overrides::default()).unwrap();
        assert!(!resolved.effective.allow_git);
        assert!(resolved.effective.allow_github);

        let overrides = Overrides {
            allow_git: true,
            ..Overrides::default()
        };
        assert!(resolve_config(cfg, overrides).unwrap().effective.allow_git);
    }

    #[test]
    fn registries_are_unioned_without_duplicates() {
        let cfg = LockguardConfigV1 {
            allowed_registries: vec![
                "https://npm.a.example/".to_string(),
                "https://npm.b.example/".to_string(),
            ],
            ..LockguardConfigV1::default()
        };
        let overrides = Overrides {
            allowed_registries: vec![
                "https://npm.b.example/".to_string(),
                "http://npm.c.example/".to_string(),
            ],
            ..Overrides::default()
        };
        let resolved = resolve_config(cfg, overrides).unwrap();
        assert_eq!(
            resolved.effective.allowed_registries,
            vec![
                "https://npm.a.example/",
                "https://npm.b.example/",
                "http://npm.c.example/",
            ]
        );
    }

    #[test]
    fn rejects_non_http_registry_prefix() {
        let overrides = Overrides {
            allowed_registries: vec!["npm.internal.example".to_string()],
            ..Overrides::default()
        };
        let err = resolve_config(LockguardConfigV1::default(), overrides).unwrap_err();
        assert!(err.to_string().contains("npm.internal.example"));
    }

    #[test]
    fn rejects_unknown_profile() {
        let cfg = LockguardConfigV1 {
            profile: Some("paranoid".to_string()),
            ..LockguardConfigV1::default()
        };
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown profile: paranoid"));
    }

    #[test]
    fn schema_marker_must_match_when_present() {
        let tagged = LockguardConfigV1 {
            schema: Some(SCHEMA_CONFIG_V1.to_string()),
            ..LockguardConfigV1::default()
        };
        assert!(resolve_config(tagged, Overrides::default()).is_ok());

        let foreign = LockguardConfigV1 {
            schema: Some("garbage".to_string()),
            ..LockguardConfigV1::default()
        };
        let err = resolve_config(foreign, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported config schema: garbage"));
    }
}
