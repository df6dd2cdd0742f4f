//! Static-analysis config resolution
//!
//! Determines the effective config file path for one run and whether the
//! file must be (re)written before any script executes.
//!
//! The legacy `[format] config-path` project setting still wins over the
//! environment-scoped setting, with a deprecation warning. The precedence
//! is an explicit branch here so the shim can be deleted cleanly once the
//! migration window closes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error(
        "The --sync flag can only be used when the `format.config-path` option is defined"
    )]
    SyncWithoutConfigPath,
}

/// Where the effective config path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Deprecated `[format] config-path` project setting.
    Legacy,
    /// `[envs.static-analysis] config-path` setting.
    Environment,
    /// No path configured; the environment generates its own config file.
    Generated,
}

/// Resolved config decision for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    /// User-provided config path, relative to the project root. `None`
    /// means the environment's internal default file is used.
    pub path: Option<String>,

    /// Which setting supplied the path.
    pub source: ConfigSource,

    /// Whether the config file must be written before scripts run.
    pub must_write: bool,
}

impl EffectiveConfig {
    /// True when the deprecated setting was used and the caller should
    /// emit the one-shot migration warning.
    pub fn used_legacy_setting(&self) -> bool {
        self.source == ConfigSource::Legacy
    }
}

/// Resolves the effective config path and write decision.
///
/// The file must be written when no explicit path exists (the environment
/// owns the generated file) or when `--sync` asks for a rewrite of a
/// user-owned file. Syncing without any configured path is an error: there
/// is nothing to sync the defaults into.
pub fn resolve(
    requested_sync: bool,
    legacy_config_path: Option<&str>,
    environment_config_path: Option<&str>,
) -> Result<EffectiveConfig, ResolveError> {
    let (path, source) = match (legacy_config_path, environment_config_path) {
        (Some(legacy), _) => (Some(legacy.to_string()), ConfigSource::Legacy),
        (None, Some(env)) => (Some(env.to_string()), ConfigSource::Environment),
        (None, None) => (None, ConfigSource::Generated),
    };

    if requested_sync && path.is_none() {
        return Err(ResolveError::SyncWithoutConfigPath);
    }

    let must_write = path.is_none() || requested_sync;

    Ok(EffectiveConfig {
        path,
        source,
        must_write,
    })
}
