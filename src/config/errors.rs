use thiserror::Error;

/// A setting that could not be read from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError { setting_name: String, error: String },
}

impl ConfigError {
    /// Name of the environment variable at fault
    pub fn setting_name(&self) -> &str {
        match self {
            Self::InvalidSetting { setting_name, .. } | Self::ParseError { setting_name, .. } => {
                setting_name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_setting() {
        let err = ConfigError::InvalidSetting {
            setting_name: "PORT".to_string(),
            reason: "must be between 1 and 65535".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid setting 'PORT': must be between 1 and 65535");
        assert_eq!(err.setting_name(), "PORT");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ConfigError::ParseError {
            setting_name: "ALGORITHM".to_string(),
            error: "unsupported algorithm 'RS256'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse setting 'ALGORITHM': unsupported algorithm 'RS256'"
        );
        assert_eq!(err.setting_name(), "ALGORITHM");
    }
}
