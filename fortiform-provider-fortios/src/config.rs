//! Provider configuration

use std::collections::HashMap;

use fortiform_core::compat::FirmwareVersion;
use fortiform_core::resource::Value;
use thiserror::Error;

/// Errors in provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Settings shared by every request the provider makes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortiosConfig {
    /// Default vdom for resources that don't set `vdomparam`
    pub vdom: Option<String>,
    /// Attempt counter handed to the client with every request (default: 1)
    pub retries: u32,
    /// Firmware of the managed device, used by compatibility tables
    pub firmware_version: Option<FirmwareVersion>,
}

impl Default for FortiosConfig {
    fn default() -> Self {
        Self {
            vdom: None,
            retries: 1,
            firmware_version: None,
        }
    }
}

impl FortiosConfig {
    /// Build the configuration from a provider block's attributes
    ///
    /// Recognized keys: `vdom`, `retries`, `firmware_version`. Unknown keys are ignored.
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(vdom) = get_string(attributes, "vdom")? {
            config.vdom = Some(vdom.to_string()).filter(|v| !v.is_empty());
        }

        if let Some(retries) = get_int(attributes, "retries")? {
            config.retries = u32::try_from(retries)
                .ok()
                .filter(|r| *r >= 1)
                .ok_or_else(|| ConfigError::invalid("retries", "must be at least 1"))?;
        }

        if let Some(version) = get_string(attributes, "firmware_version")? {
            config.firmware_version = Some(
                version
                    .parse()
                    .map_err(|e| ConfigError::invalid("firmware_version", format!("{}", e)))?,
            );
        }

        Ok(config)
    }
}

/// Get a string attribute value
fn get_string<'a>(
    attributes: &'a HashMap<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, ConfigError> {
    match attributes.get(key) {
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ConfigError::invalid(key, "expected a string")),
        None => Ok(None),
    }
}

/// Get an integer attribute value
fn get_int(attributes: &HashMap<String, Value>, key: &str) -> Result<Option<i64>, ConfigError> {
    match attributes.get(key) {
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(_) => Err(ConfigError::invalid(key, "expected an integer")),
        None => Ok(None),
    }
}
