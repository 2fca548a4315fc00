use std::sync::Arc;

use crate::config::errors::ConfigError;
use crate::config::EnvironmentProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    pub env_override: Option<String>,
    pub default_value: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    /// Load a setting value with source tracking
    ///
    /// An environment variable wins over the default. Both are validated
    /// against the same rules, so a bad default is caught at startup too.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ConfigError> {
        let setting_name = self.setting_name();

        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, setting_name)?;

            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ConfigError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Default,
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ConfigError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ConfigError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ConfigError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse an integer value from string
    pub fn parse_integer(value: &str, setting_name: &str) -> Result<i64, ConfigError> {
        value.trim().parse::<i64>()
            .map_err(|e| ConfigError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected integer, got '{}': {}", value, e),
            })
    }

    /// Parse a port number from string with validation
    ///
    /// Validates that the port is in the valid range (1-65535).
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ConfigError> {
        let port = value.trim().parse::<u16>()
            .map_err(|e| ConfigError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected port number (1-65535), got '{}': {}", value, e),
            })?;

        if port == 0 {
            return Err(ConfigError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }
}

/// Range validation utilities
impl ConfigSpec {
    /// Validate an integer value is within the specified range (inclusive)
    pub fn validate_integer_range(value: &str, min: i64, max: i64) -> Result<(), String> {
        let parsed = value.parse::<i64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a port number is within the specified range (inclusive)
    pub fn validate_port_range(value: &str, min: u16, max: u16) -> Result<(), String> {
        let parsed = value.parse::<u16>()
            .map_err(|_| format!("Expected port number between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Port {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    /// Validate a bind address: an IPv4/IPv6 literal or a hostname
    ///
    /// Does not perform DNS resolution.
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        let host = value.trim();

        if host.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if host.parse::<std::net::IpAddr>().is_ok() {
            return Ok(());
        }

        let valid_hostname = host.len() <= 253
            && host.split('.').all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            });

        if valid_hostname {
            Ok(())
        } else {
            Err(format!("'{}' is not a valid IP address or hostname", host))
        }
    }
}
