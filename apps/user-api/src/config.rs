use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, DEFAULT_MODERATOR_ROLE, DEFAULT_USER_API_PORT, MAX_BODY_SIZE_BYTES,
    MODERATOR_ROLE, RATE_LIMIT_BURST, RATE_LIMIT_PER_MINUTE, REQUEST_TIMEOUT_SECS,
    SHUTDOWN_TIMEOUT_SECS, USER_API_PORT,
};

/// Parse an environment variable, falling back to `default` when unset or invalid.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(env_var = key, value = %raw, "ignoring unparsable configuration value");
            default
        }),
        Err(_) => default,
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        let cors_allowed_origins = std::env::var(CORS_ALLOWED_ORIGINS)
            .ok()
            .map(|v| parse_origins(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            rate_limit_per_minute: env_or(RATE_LIMIT_PER_MINUTE, default.rate_limit_per_minute).max(1),
            rate_limit_burst: env_or(RATE_LIMIT_BURST, default.rate_limit_burst).max(1),
            request_timeout: Duration::from_secs(env_or(REQUEST_TIMEOUT_SECS, 30)),
            max_body_size: env_or(MAX_BODY_SIZE_BYTES, default.max_body_size),
            shutdown_timeout: Duration::from_secs(env_or(SHUTDOWN_TIMEOUT_SECS, 30)),
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Milliseconds between two replenished rate-limit permits.
    pub fn replenish_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_limit_per_minute.max(1))).max(1)
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Realm role required for user administration
    pub moderator_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            moderator_role: DEFAULT_MODERATOR_ROLE.to_string(),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let moderator_role = std::env::var(MODERATOR_ROLE)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODERATOR_ROLE.to_string());
        Self { moderator_role }
    }
}

pub fn server_port() -> u16 {
    env_or(USER_API_PORT, DEFAULT_USER_API_PORT)
}
