/*
 * Responsibility
 * - Load process settings from the environment (.env supported)
 * - Resolve token options once at startup (immutable afterwards)
 * - Fail startup on malformed values; a missing access secret only warns,
 *   issuance then fails at call time
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::services::spa_auth::{
    AccessTokenOptions, ActivationPeriod, RefreshTokenOptions, SpaAuthOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
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

#[derive(Debug)]
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

/// Attributes shared by the two access-token cookies.
#[derive(Clone, Debug)]
pub struct CookieSettings {
    // Max-Age of both cookies (seconds)
    pub expiration_seconds: i64,
    pub domain: Option<String>,
    pub secure: bool,
}

/// Limits applied by the HTTP middleware stack.
#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub spa_auth: SpaAuthOptions,
    pub cookies: CookieSettings,
    pub http: HttpSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (the process environment in `from_env`).
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match var("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let access_secret = var("JWT_ACCESS_SECRET_KEY").unwrap_or_default();
        if access_secret.is_empty() {
            warn!("JWT_ACCESS_SECRET_KEY is not set; access token issuance will fail");
        }
        let access_period = var("JWT_ACCESS_ACTIVATION_PERIOD")
            .ok_or(ConfigError::Missing("JWT_ACCESS_ACTIVATION_PERIOD"))?
            .parse::<ActivationPeriod>()
            .map_err(|_| ConfigError::Invalid("JWT_ACCESS_ACTIVATION_PERIOD"))?;

        let refresh_period = var("JWT_REFRESH_ACTIVATION_PERIOD")
            .map(|s| {
                s.parse::<ActivationPeriod>()
                    .map_err(|_| ConfigError::Invalid("JWT_REFRESH_ACTIVATION_PERIOD"))
            })
            .transpose()?;
        let use_refresh_token = var("JWT_REFRESH_SECRET_KEY").map(|secret_key| RefreshTokenOptions {
            secret_key,
            activation_period: refresh_period,
        });

        let expiration_seconds = match var("COOKIE_EXPIRATION") {
            Some(s) => s
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or(ConfigError::Invalid("COOKIE_EXPIRATION"))?,
            None => 86_400, // 1 day
        };
        let cookie_domain = var("COOKIE_DOMAIN").filter(|s| !s.trim().is_empty());

        // Token payloads are small; 64 KiB leaves room for large claim sets.
        let body_limit_bytes = match var("HTTP_BODY_LIMIT_BYTES") {
            Some(s) => s
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("HTTP_BODY_LIMIT_BYTES"))?,
            None => 64 * 1024,
        };
        let request_timeout_seconds = match var("HTTP_REQUEST_TIMEOUT_SECONDS") {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("HTTP_REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            spa_auth: SpaAuthOptions {
                use_access_token: AccessTokenOptions {
                    secret_key: access_secret,
                    activation_period: access_period,
                },
                use_refresh_token,
            },
            cookies: CookieSettings {
                expiration_seconds,
                domain: cookie_domain,
                secure: app_env.is_production(),
            },
            http: HttpSettings {
                body_limit_bytes,
                request_timeout: Duration::from_secs(request_timeout_seconds),
            },
        })
    }
}
