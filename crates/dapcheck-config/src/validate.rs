use crate::config::{HarnessConfig, TransportKind};
use crate::error::ConfigError;

/// Validate a [`HarnessConfig`], returning all detected violations.
///
/// Returns `Ok(())` when the config is valid, or `Err` with a
/// vector of every validation error found.
pub fn validate(config: &HarnessConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.client_id.is_empty() {
        errors.push(ConfigError::Validation {
            field: "client_id".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if config.adapter_id.is_empty() {
        errors.push(ConfigError::Validation {
            field: "adapter_id".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    match config.server.transport {
        TransportKind::Tcp => {
            if config.server.socket_addr().is_none() {
                errors.push(ConfigError::Validation {
                    field: "server.address".to_string(),
                    message: format!("not a socket address: {:?}", config.server.address),
                });
            }
        }
        TransportKind::Stdio => {
            if config.server.command.as_deref().map_or(true, str::is_empty) {
                errors.push(ConfigError::Validation {
                    field: "server.command".to_string(),
                    message: "required for the stdio transport".to_string(),
                });
            }
        }
    }

    if config.timeouts.request_ms == 0 {
        errors.push(ConfigError::Validation {
            field: "timeouts.request_ms".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    if config.timeouts.event_ms == 0 {
        errors.push(ConfigError::Validation {
            field: "timeouts.event_ms".to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
