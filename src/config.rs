//! Storefront configuration parsed from environment variables.
//!
//! Unset variables fall back to defaults; set-but-unparseable variables are
//! rejected so a typo never silently becomes a default.

use std::env::VarError;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CATALOG_LATENCY_MS: u64 = 300;
pub const DEFAULT_CATALOG_FAILURE_RATE: f64 = 0.0;
pub const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_LOGIN_MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub port: u16,
    /// Simulated latency of the in-memory catalog supplier.
    pub catalog_latency: Duration,
    /// Probability in `0.0..=1.0` that a catalog fetch fails.
    pub catalog_failure_rate: f64,
    /// Upper bound on a resolver fetch before it falls back to empty.
    pub resolve_timeout: Duration,
    pub min_password_len: usize,
    pub cookie_secure: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_latency: Duration::from_millis(DEFAULT_CATALOG_LATENCY_MS),
            catalog_failure_rate: DEFAULT_CATALOG_FAILURE_RATE,
            resolve_timeout: Duration::from_millis(DEFAULT_RESOLVE_TIMEOUT_MS),
            min_password_len: DEFAULT_LOGIN_MIN_PASSWORD_LEN,
            cookie_secure: false,
        }
    }
}

impl StorefrontConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CATALOG_LATENCY_MS`: default 300
    /// - `CATALOG_FAILURE_RATE`: default 0.0, must lie in `0.0..=1.0`
    /// - `RESOLVE_TIMEOUT_MS`: default 2000
    /// - `LOGIN_MIN_PASSWORD_LEN`: default 6
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any variable that is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_failure_rate = match env_raw("CATALOG_FAILURE_RATE")? {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => rate,
                _ => return Err(invalid("CATALOG_FAILURE_RATE", raw)),
            },
            None => DEFAULT_CATALOG_FAILURE_RATE,
        };

        let cookie_secure = match env_raw("COOKIE_SECURE")? {
            Some(raw) => parse_bool(&raw).ok_or_else(|| invalid("COOKIE_SECURE", raw))?,
            None => false,
        };

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            catalog_latency: Duration::from_millis(env_parse("CATALOG_LATENCY_MS", DEFAULT_CATALOG_LATENCY_MS)?),
            catalog_failure_rate,
            resolve_timeout: Duration::from_millis(env_parse("RESOLVE_TIMEOUT_MS", DEFAULT_RESOLVE_TIMEOUT_MS)?),
            min_password_len: env_parse("LOGIN_MIN_PASSWORD_LEN", DEFAULT_LOGIN_MIN_PASSWORD_LEN)?,
            cookie_secure,
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env_raw(key)? {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| invalid(key, raw)),
        None => Ok(default),
    }
}

/// `None` only when the variable is unset; non-UTF-8 values are rejected.
fn env_raw(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(invalid(key, raw.to_string_lossy().into_owned())),
    }
}

fn invalid(key: &str, value: String) -> ConfigError {
    ConfigError::Invalid { key: key.into(), value }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
