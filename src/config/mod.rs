pub mod env;
mod loader;

pub use env::{
    AppConfig, ConfigError, DirectoryConfig, GeminiConfig, SmtpConfig, WebContentConfig,
};
pub use loader::{load_config, load_gemini_config, load_smtp_config, load_web_config};
