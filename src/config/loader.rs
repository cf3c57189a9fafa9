use std::{env, str::FromStr, time::Duration};

use crate::ai::inference::GEMINI_API_BASE;

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, GeminiConfig, LoggingConfig, SmtpConfig,
    WebContentConfig,
};

/// Looks up one setting by name.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

pub fn load_config() -> AppConfig {
    AppConfig::from_lookup(&process_env)
}

pub fn load_gemini_config() -> GeminiConfig {
    GeminiConfig::from_lookup(&process_env)
}

pub fn load_smtp_config() -> Result<SmtpConfig, ConfigError> {
    SmtpConfig::from_lookup(&process_env)
}

pub fn load_web_config() -> Result<WebContentConfig, ConfigError> {
    WebContentConfig::from_lookup(&process_env)
}

impl AppConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            directories: DirectoryConfig {
                logs_dir: or_default(lookup, "LOGS_DIR", "logs"),
            },
            logging: LoggingConfig {
                level: or_default(lookup, "LOG_LEVEL", "info"),
            },
        }
    }
}

impl GeminiConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            api_key: non_empty(lookup, "GOOGLE_API_KEY"),
            model: or_default(lookup, "GEMINI_MODEL", "gemini-1.5-pro"),
            api_base: or_default(lookup, "GEMINI_API_BASE", GEMINI_API_BASE),
        }
    }
}

impl SmtpConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: or_default(lookup, "SMTP_SERVER", "smtp.gmail.com"),
            port: parse_or(lookup, "SMTP_PORT", 587)?,
            sender: non_empty(lookup, "EMAIL_ADDRESS"),
            password: non_empty(lookup, "EMAIL_PASSWORD"),
        })
    }
}

impl WebContentConfig {
    fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            fetch_timeout: Duration::from_millis(parse_or(lookup, "WEBPAGE_FETCH_TIMEOUT", 10_000)?),
            request_delay: Duration::from_millis(parse_or(lookup, "REQUEST_DELAY_MS", 1_000)?),
        })
    }
}

fn non_empty(lookup: Lookup<'_>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn or_default(lookup: Lookup<'_>, key: &str, default: &str) -> String {
    non_empty(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(lookup, key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
