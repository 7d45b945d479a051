/*
 * Responsibility
 * - Load settings from the environment (PORT, default base uri, signing key, ...)
 * - Validate them (startup fails on invalid values)
 * - A missing signing key is NOT a startup error: it is reported per request as 500
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::tenant::SigningKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub default_system_base_uri: String,
    pub signature_secret_key: Option<SigningKey>,
    pub allow_unsigned_defaults: bool,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let default_system_base_uri = lookup("DEFAULT_SYSTEM_BASE_URI")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if !default_system_base_uri.is_empty() {
            url::Url::parse(&default_system_base_uri)
                .map_err(|_| ConfigError::Invalid("DEFAULT_SYSTEM_BASE_URI"))?;
        }

        let signature_secret_key = match lookup("SIGNATURE_SECRET_KEY") {
            Some(encoded) => SigningKey::from_base64(&encoded)
                .map_err(|_| ConfigError::Invalid("SIGNATURE_SECRET_KEY"))?,
            None => None,
        };

        let allow_unsigned_defaults = match lookup("ALLOW_UNSIGNED_DEFAULTS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("ALLOW_UNSIGNED_DEFAULTS"))?,
            None => false,
        };

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .map(|v| v.parse::<usize>())
            .transpose()
            .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            default_system_base_uri,
            signature_secret_key,
            allow_unsigned_defaults,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.default_system_base_uri.is_empty());
        assert!(config.signature_secret_key.is_none());
        assert!(!config.allow_unsigned_defaults);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn reads_tenant_settings() {
        let config = config(&[
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("DEFAULT_SYSTEM_BASE_URI", "https://default.example.com"),
            ("SIGNATURE_SECRET_KEY", "SmVmZQ=="),
            ("ALLOW_UNSIGNED_DEFAULTS", "yes"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.default_system_base_uri, "https://default.example.com");
        assert!(config.signature_secret_key.is_some());
        assert!(config.allow_unsigned_defaults);
    }

    #[test]
    fn empty_secret_is_absent() {
        let config = config(&[("SIGNATURE_SECRET_KEY", "")]).unwrap();
        assert!(config.signature_secret_key.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            config(&[("SIGNATURE_SECRET_KEY", "abc+(9-!")]).unwrap_err(),
            ConfigError::Invalid("SIGNATURE_SECRET_KEY")
        );
        assert_eq!(
            config(&[("DEFAULT_SYSTEM_BASE_URI", "not a url")]).unwrap_err(),
            ConfigError::Invalid("DEFAULT_SYSTEM_BASE_URI")
        );
        assert_eq!(
            config(&[("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            config(&[("ALLOW_UNSIGNED_DEFAULTS", "maybe")]).unwrap_err(),
            ConfigError::Invalid("ALLOW_UNSIGNED_DEFAULTS")
        );
    }
}
