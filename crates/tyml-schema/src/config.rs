//! Schema feature configuration.
//!
//! The schema feature is off by default. Enable it explicitly or through
//! the `TYML_SCHEMA_ENABLED` environment variable.

/// Environment variable consulted by [`SchemaConfig::from_env`].
pub const SCHEMA_ENABLED_VAR: &str = "TYML_SCHEMA_ENABLED";

/// Whether schema documents are honoured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaConfig {
    pub enabled: bool,
}

impl SchemaConfig {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TYML_SCHEMA_ENABLED` (`true`/`false`/`1`/`0`/`yes`/`no`, default: `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let enabled = match lookup(SCHEMA_ENABLED_VAR) {
            Some(raw) => parse_bool(SCHEMA_ENABLED_VAR, &raw)?,
            None => false,
        };
        Ok(Self { enabled })
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool(var.to_string(), raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {0}: {1:?} (expected true/false/1/0/yes/no)")]
    InvalidBool(String, String),
}
