/*
 * Responsibility
 * - Load settings from environment (.env supported via dotenvy)
 * - Validate them up front (startup fails on missing/invalid values)
 */
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::payload::DEFAULT_PAYLOAD_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
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
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub access_token_key_name: String,
    pub access_token_profile_url: String,
    pub access_token_payload: bool,
    /// token -> display name
    pub access_tokens: HashMap<String, String>,

    pub auth_payload_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (env in production, a map in tests).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = get("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let access_token_key_name =
            get("ACCESS_TOKEN_KEY_NAME").unwrap_or_else(|| "access_token".to_string());
        if access_token_key_name.trim().is_empty() {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_KEY_NAME"));
        }

        let access_token_profile_url = get("ACCESS_TOKEN_PROFILE_URL").unwrap_or_default();

        let access_token_payload = match get("ACCESS_TOKEN_PAYLOAD") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("ACCESS_TOKEN_PAYLOAD"))?,
            None => false,
        };

        let access_tokens = parse_tokens(
            &get("ACCESS_TOKENS").ok_or(ConfigError::Missing("ACCESS_TOKENS"))?,
        )?;

        let auth_payload_limit_bytes = match get("AUTH_PAYLOAD_LIMIT_BYTES") {
            Some(raw) => parse_positive::<usize>(&raw)
                .ok_or(ConfigError::Invalid("AUTH_PAYLOAD_LIMIT_BYTES"))?,
            None => DEFAULT_PAYLOAD_LIMIT,
        };

        // 0 would time out every request that yields.
        let request_timeout_seconds = match get("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => parse_positive::<u64>(&raw)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        Ok(Self {
            addr,
            app_env,
            access_token_key_name,
            access_token_profile_url,
            access_token_payload,
            access_tokens,
            auth_payload_limit_bytes,
            request_timeout_seconds,
        })
    }
}

fn parse_positive<T>(raw: &str) -> Option<T>
where
    T: FromStr + Default + PartialEq,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v != T::default())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ACCESS_TOKENS=barry:Barry White,terry:Terry
fn parse_tokens(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut tokens = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (token, name) = entry
            .split_once(':')
            .ok_or(ConfigError::Invalid("ACCESS_TOKENS"))?;
        let (token, name) = (token.trim(), name.trim());
        if token.is_empty() || name.is_empty() {
            return Err(ConfigError::Invalid("ACCESS_TOKENS"));
        }
        tokens.insert(token.to_string(), name.to_string());
    }

    if tokens.is_empty() {
        return Err(ConfigError::Missing("ACCESS_TOKENS"));
    }
    Ok(tokens)
}
