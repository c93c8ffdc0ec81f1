/*
 * Responsibility
 * - Reading settings from the environment (.env first, then the process env)
 * - Validating them (startup fails on bad values)
 * - Turning the session settings into extractor configuration
 */
use std::net::SocketAddr;

use session_gate::extract::DEFAULT_BODY_LIMIT;
use session_gate::{CookieExtractor, HeaderExtractor};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw
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

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub session_cookie: String,
    pub session_header: String,
    pub session_prefix: String,

    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let session_cookie = lookup("SESSION_COOKIE").unwrap_or_else(|| "session".to_string());
        if session_cookie.trim().is_empty() {
            return Err(ConfigError::Invalid("SESSION_COOKIE"));
        }

        let session_header =
            lookup("SESSION_HEADER").unwrap_or_else(|| "authorization".to_string());
        if session_header.trim().is_empty() {
            return Err(ConfigError::Invalid("SESSION_HEADER"));
        }

        // An explicitly empty prefix disables stripping.
        let session_prefix = lookup("SESSION_PREFIX").unwrap_or_else(|| "Bearer ".to_string());

        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("BODY_LIMIT_BYTES"))?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            addr,
            app_env,
            session_cookie,
            session_header,
            session_prefix,
            body_limit_bytes,
        })
    }

    pub fn cookie_extractor(&self) -> CookieExtractor {
        CookieExtractor::new(&self.session_cookie)
    }

    pub fn header_extractor(&self) -> HeaderExtractor {
        HeaderExtractor::new(&self.session_header).with_prefix(&self.session_prefix)
    }
}
