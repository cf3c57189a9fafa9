use std::time::Duration;

use thiserror::Error;

/// Settings every stage needs before it can log anything. Stage-specific
/// settings (`GeminiConfig`, `SmtpConfig`, `WebContentConfig`) are loaded by
/// the stage that uses them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub sender: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WebContentConfig {
    pub fetch_timeout: Duration,
    pub request_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("cannot use SMTP relay {server}: {source}")]
    Relay {
        server: String,
        #[source]
        source: lettre::transport::smtp::Error,
    },
}

impl GeminiConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::Missing("GOOGLE_API_KEY"))
    }
}

impl SmtpConfig {
    /// Sender address and password, both required to authenticate against the relay.
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let sender = self
            .sender
            .as_deref()
            .ok_or(ConfigError::Missing("EMAIL_ADDRESS"))?;
        let password = self
            .password
            .as_deref()
            .ok_or(ConfigError::Missing("EMAIL_PASSWORD"))?;
        Ok((sender, password))
    }
}

impl Default for WebContentConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            request_delay: Duration::from_secs(1),
        }
    }
}
