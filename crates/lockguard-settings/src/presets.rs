use lockguard_domain::policy::RunConfiguration;

pub const PROFILES: &[&str] = &["default", "strict", "permissive"];

/// Preset profiles. `None` for a name that is not in [`PROFILES`].
pub fn preset(profile: &str) -> Option<RunConfiguration> {
    match profile {
        "default" => Some(RunConfiguration::default()),
        "strict" => Some(RunConfiguration {
            strict: true,
            ..RunConfiguration::default()
        }),
        "permissive" => Some(RunConfiguration {
            allow_git: true,
            allow_github: true,
            ..RunConfiguration::default()
        }),
        _ => None,
    }
}
