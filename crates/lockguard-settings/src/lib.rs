//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{LockguardConfigV1, SCHEMA_CONFIG_V1};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `lockguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<LockguardConfigV1> {
    let cfg: LockguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective run configuration (profile, then file, then overrides).
pub fn resolve_config(
    cfg: LockguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
