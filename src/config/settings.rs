use std::fmt;
use std::sync::Arc;

use jsonwebtoken::Algorithm;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ConfigError;
use crate::config::EnvironmentProvider;

/// Non-secret settings for the server, persistence and tokens
pub struct AppSettings {
    database_url: String,
    audit_database_url: String,
    server_host: String,
    server_port: u16,
    algorithm: Algorithm,
    access_token_expire_minutes: i64,
}

impl AppSettings {
    /// Load settings from the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://aws_image_manager.db?mode=rwc")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let audit_database_url = ConfigSpec::new(env_provider.clone())
            .env_override("AUDIT_DATABASE_URL")
            .default_value("sqlite://aws_image_manager_audit.db?mode=rwc")
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_setting_with_source()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load_setting_with_source()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let algorithm_value = ConfigSpec::new(env_provider.clone())
            .env_override("ALGORITHM")
            .default_value("HS256")
            .validator(Self::validate_algorithm)
            .load_setting_with_source()?
            .value;
        let algorithm = Self::parse_algorithm(&algorithm_value)?;

        let expire_value = ConfigSpec::new(env_provider)
            .env_override("ACCESS_TOKEN_EXPIRE_MINUTES")
            .default_value("30")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 1440))
            .load_setting_with_source()?
            .value;
        let access_token_expire_minutes =
            ConfigSpec::parse_integer(&expire_value, "ACCESS_TOKEN_EXPIRE_MINUTES")?;

        Ok(Self {
            database_url,
            audit_database_url,
            server_host,
            server_port,
            algorithm,
            access_token_expire_minutes,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Only the HMAC family is accepted; tokens are signed with a shared secret.
    fn validate_algorithm(value: &str) -> Result<(), String> {
        match value {
            "HS256" | "HS384" | "HS512" => Ok(()),
            other => Err(format!(
                "Unsupported signing algorithm '{}'. Expected HS256, HS384 or HS512",
                other
            )),
        }
    }

    fn parse_algorithm(value: &str) -> Result<Algorithm, ConfigError> {
        match value {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            other => Err(ConfigError::ParseError {
                setting_name: "ALGORITHM".to_string(),
                error: format!("Unsupported signing algorithm '{}'", other),
            }),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn audit_database_url(&self) -> &str {
        &self.audit_database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.access_token_expire_minutes * 60
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("audit_database_url", &self.audit_database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .finish()
    }
}
