use crate::config::HarnessConfig;
use crate::error::ConfigError;

/// Layer a TOML fragment over `base`.
///
/// Tables merge key by key; any other value in `overlay_toml` replaces
/// the one in `base` (arrays included). Keys absent from the overlay keep
/// their `base` values.
pub fn merge_configs(
    base: &HarnessConfig,
    overlay_toml: &str,
) -> Result<HarnessConfig, ConfigError> {
    let serialized = toml::to_string(base).map_err(parse_error)?;
    let mut merged: toml::Table = toml::from_str(&serialized).map_err(parse_error)?;
    let overlay: toml::Table = toml::from_str(overlay_toml).map_err(parse_error)?;

    merge_tables(&mut merged, overlay);

    toml::Value::Table(merged).try_into().map_err(parse_error)
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(patch) => match base.get_mut(&key) {
                Some(toml::Value::Table(inner)) => merge_tables(inner, patch),
                _ => {
                    base.insert(key, toml::Value::Table(patch));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

fn parse_error(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse(e.to_string())
}
