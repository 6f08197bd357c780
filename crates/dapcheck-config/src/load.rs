use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;
use crate::error::ConfigError;
use crate::merge::merge_configs;
use crate::validate::validate;

/// Load, layer, and validate the harness configuration.
///
/// 1. Reads `path`. A missing file is [`ConfigError::NotFound`].
/// 2. Merges the file over [`HarnessConfig::default()`].
/// 3. If a sibling `<stem>.local.toml` exists, merges it on top.
/// 4. Validates the merged result.
///
/// # Errors
///
/// Returns [`ConfigError`] on I/O failure, parse failure, or
/// validation failure.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut config = merge_configs(&HarnessConfig::default(), &content)?;

    if let Some(local) = local_override(path) {
        tracing::debug!("merging local overrides from {}", local.display());
        let local_content = std::fs::read_to_string(&local)?;
        config = merge_configs(&config, &local_content)?;
    }

    check(&config)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file exists but cannot be read,
/// parsed, or validated.
pub fn load_or_default(path: &Path) -> Result<HarnessConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::NotFound(_)) => {
            tracing::info!("no config at {}, using defaults", path.display());
            Ok(HarnessConfig::default())
        }
        other => other,
    }
}

/// Parse a TOML string directly into a validated [`HarnessConfig`].
///
/// Useful for tests or one-off parsing without file I/O.
///
/// # Errors
///
/// Returns [`ConfigError`] on parse or validation failure.
pub fn load_from_str(toml_str: &str) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    check(&config)?;
    Ok(config)
}

/// `dir/dapcheck.toml` -> `dir/dapcheck.local.toml`, if that file exists.
fn local_override(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let candidate = path.with_file_name(format!("{stem}.local.toml"));
    (candidate != path && candidate.exists()).then_some(candidate)
}

fn check(config: &HarnessConfig) -> Result<(), ConfigError> {
    validate(config).map_err(|errors| {
        for err in &errors {
            tracing::warn!("{err}");
        }
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| ConfigError::Validation {
                field: "unknown".to_string(),
                message: "validation failed".to_string(),
            })
    })
}
