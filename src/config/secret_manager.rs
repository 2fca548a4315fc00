use std::fmt;
use std::sync::Arc;

use crate::config::{EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing { secret_name: String },
    InvalidLength { secret_name: String, expected: usize, actual: usize },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength { secret_name, expected, actual } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Holds the token signing key and the password pepper
///
/// Neither value is ever printed; `Debug` and `Display` only show metadata.
pub struct SecretManager {
    secret_key: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Load and validate all secrets from the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let secret_key = Self::load_secret(env_provider.as_ref(), &Self::secret_key_config())?;
        let password_pepper = Self::load_secret(env_provider.as_ref(), &Self::pepper_config())?;

        Ok(Self {
            secret_key,
            password_pepper,
        })
    }

    /// Configuration for the token signing key
    fn secret_key_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "SECRET_KEY".to_string(),
        })
        .required(true)
        .min_length(32)
    }

    /// Configuration for the password pepper
    fn pepper_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "PASSWORD_PEPPER".to_string(),
        })
        .required(true)
        .min_length(16)
    }

    /// Get the token signing key
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Get the pepper for password hashing
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: &SecretConfig,
    ) -> Result<String, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match env_provider.get_var(name) {
                Some(v) => v,
                None if !config.required => return Ok(String::new()),
                None => return Err(SecretError::missing(name)),
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(SecretError::invalid_length(
                    config.secret_type.name(),
                    min_len,
                    value.len(),
                ));
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("secret_key", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 2 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const VALID_KEY: &str = "this-is-a-valid-signing-key-with-32-characters";
    const VALID_PEPPER: &str = "valid-pepper-16ch";

    fn valid_env() -> MockEnvironment {
        MockEnvironment::empty()
            .with_var("SECRET_KEY", VALID_KEY)
            .with_var("PASSWORD_PEPPER", VALID_PEPPER)
    }

    fn load(env: MockEnvironment) -> Result<SecretManager, SecretError> {
        SecretManager::from_env_provider(Arc::new(env))
    }

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let manager = load(valid_env()).unwrap();

        assert_eq!(manager.secret_key(), VALID_KEY);
        assert_eq!(manager.password_pepper(), VALID_PEPPER);
    }

    #[test]
    fn test_error_when_secret_key_missing() {
        let err = load(valid_env().without_var("SECRET_KEY")).unwrap_err();

        match err {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "SECRET_KEY"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_error_when_pepper_missing() {
        let err = load(valid_env().without_var("PASSWORD_PEPPER")).unwrap_err();

        match err {
            SecretError::Missing { secret_name } => assert_eq!(secret_name, "PASSWORD_PEPPER"),
            _ => panic!("Expected Missing error"),
        }
    }

    #[test]
    fn test_error_when_secret_key_too_short() {
        let err = load(valid_env().with_var("SECRET_KEY", "short-secret")).unwrap_err();

        match err {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "SECRET_KEY");
                assert_eq!(expected, 32);
                assert_eq!(actual, 12);
            }
            _ => panic!("Expected InvalidLength error"),
        }
    }

    #[test]
    fn test_error_when_pepper_too_short() {
        let err = load(valid_env().with_var("PASSWORD_PEPPER", "short")).unwrap_err();

        match err {
            SecretError::InvalidLength { secret_name, expected, actual } => {
                assert_eq!(secret_name, "PASSWORD_PEPPER");
                assert_eq!(expected, 16);
                assert_eq!(actual, 5);
            }
            _ => panic!("Expected InvalidLength error"),
        }
    }

    #[test]
    fn test_debug_and_display_do_not_expose_secrets() {
        let manager = load(valid_env()).unwrap();

        let debug_output = format!("{:?}", manager);
        let display_output = format!("{}", manager);

        assert!(debug_output.contains("<redacted>"));
        assert!(display_output.contains("secrets_loaded: 2"));
        for output in [&debug_output, &display_output] {
            assert!(!output.contains(VALID_KEY));
            assert!(!output.contains(VALID_PEPPER));
        }
    }

    #[test]
    fn test_optional_secret_may_be_absent() {
        let config = SecretConfig::new(SecretType::EnvVar {
            name: "OPTIONAL_SECRET".to_string(),
        })
        .required(false)
        .min_length(10);

        let value = SecretManager::load_secret(&MockEnvironment::empty(), &config).unwrap();
        assert!(value.is_empty());
    }
}
