//! Process-wide settings read once at startup.
//!
//! The credential check lives here so a missing key stops the program before
//! the terminal UI is drawn and before any request can be built. Settings are
//! read-only afterwards and need no teardown.

use std::path::PathBuf;
use std::time::Duration;

/// Default model used for analyses.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Generative Language API base.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credential variables, in lookup order.
const API_KEY_VARS: [&str; 3] = ["HEALTHMATE_API_KEY", "GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set (checked HEALTHMATE_API_KEY, GEMINI_API_KEY, API_KEY)")]
    MissingApiKey,

    #[error("API key in {0} is empty")]
    InvalidApiKey(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// How log output is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Wrapper that keeps the credential out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub report_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if the credential is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` if the credential is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = Self::resolve_api_key(&lookup)?;

        let model = lookup("HEALTHMATE_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base = lookup("HEALTHMATE_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = match lookup("HEALTHMATE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or(ConfigError::InvalidValue {
                        name: "HEALTHMATE_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let report_dir = lookup("HEALTHMATE_REPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        let log_mode = lookup("HEALTHMATE_LOG_MODE")
            .map(|v| LogMode::parse(&v))
            .unwrap_or(LogMode::Auto);

        let log_file = lookup("HEALTHMATE_LOG_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("healthmate.log"));

        Ok(Self {
            api_key,
            model,
            api_base,
            timeout,
            report_dir,
            log_mode,
            log_file,
        })
    }

    fn resolve_api_key<F>(lookup: &F) -> Result<ApiKey, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in API_KEY_VARS {
            if let Some(value) = lookup(name) {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ConfigError::InvalidApiKey(name));
                }
                return Ok(ApiKey(trimmed.to_string()));
            }
        }
        Err(ConfigError::MissingApiKey)
    }
}
